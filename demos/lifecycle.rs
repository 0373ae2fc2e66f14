use std::sync::Arc;
use std::time::Duration;
use threadctl::{ConsoleSink, Interrupt, OutputFormat, Worker, WorkerConfig};

fn main() -> anyhow::Result<()> {
    let interrupt = Interrupt::new();
    let mut worker = Worker::new(
        Arc::new(ConsoleSink::new(OutputFormat::Text)),
        WorkerConfig {
            work_delay: Duration::from_secs(60),
            interrupt: Some(interrupt.clone()),
        },
    );

    worker.start()?;

    std::thread::sleep(Duration::from_secs(1));
    println!("Interrupting the worker's delay...");
    interrupt.trigger();

    worker.stop();
    worker.stop();
    println!("Worker is running: {}", worker.is_running());

    Ok(())
}
