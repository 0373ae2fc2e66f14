use anyhow::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::interrupt::Interrupt;
use crate::trace::TraceSink;
use crate::worker::{Worker, WorkerConfig};

#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub iterations: usize,
    pub work_delay: Duration,
    pub interrupt: Option<Interrupt>,
}

#[derive(Debug, Clone, Copy)]
pub struct RunReport {
    pub iterations: usize,
    pub elapsed: Duration,
}

/// Runs `iterations` sequential workers, each started once and stopped
/// twice. The second stop on each worker is the redundant one.
pub fn run(config: &DriverConfig, sink: Arc<dyn TraceSink>) -> Result<RunReport> {
    let started_at = Instant::now();

    for i in 0..config.iterations {
        tracing::debug!("Driver iteration {}", i);

        let mut worker = Worker::new(
            sink.clone(),
            WorkerConfig {
                work_delay: config.work_delay,
                interrupt: config.interrupt.clone(),
            },
        );
        worker.start()?;
        worker.stop();
        worker.stop();
    }

    let elapsed = started_at.elapsed();
    tracing::info!(
        "Ran {} workers in {}ms",
        config.iterations,
        elapsed.as_millis()
    );

    Ok(RunReport {
        iterations: config.iterations,
        elapsed,
    })
}
