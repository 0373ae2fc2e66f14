use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use threadctl::{driver, DriverConfig, Interrupt, RecordingSink, TraceEvent};

#[test]
fn test_ten_sequential_workers() -> Result<()> {
    let sink = Arc::new(RecordingSink::new());
    let delay = Duration::from_millis(20);

    let report = driver::run(
        &DriverConfig {
            iterations: 10,
            work_delay: delay,
            interrupt: None,
        },
        sink.clone(),
    )?;

    assert_eq!(report.iterations, 10);
    assert!(report.elapsed >= delay * 10);

    let events = sink.events();
    assert_eq!(events.len(), 50);
    for chunk in events.chunks(5) {
        assert_eq!(chunk[0], TraceEvent::Start);
        assert!(matches!(chunk[1], TraceEvent::Begin { .. }));
        assert!(matches!(chunk[2], TraceEvent::End { .. }));
        assert_eq!(chunk[3], TraceEvent::Stopped);
        assert_eq!(chunk[4], TraceEvent::AlreadyStopped);
        assert_eq!(chunk[1].task(), chunk[2].task());
    }

    Ok(())
}

#[test]
fn test_zero_iterations() -> Result<()> {
    let sink = Arc::new(RecordingSink::new());

    let report = driver::run(
        &DriverConfig {
            iterations: 0,
            work_delay: Duration::from_millis(20),
            interrupt: None,
        },
        sink.clone(),
    )?;

    assert_eq!(report.iterations, 0);
    assert!(sink.events().is_empty());

    Ok(())
}

#[test]
fn test_triggered_interrupt_shortens_run() -> Result<()> {
    let sink = Arc::new(RecordingSink::new());
    let interrupt = Interrupt::new();
    interrupt.trigger();

    let report = driver::run(
        &DriverConfig {
            iterations: 10,
            work_delay: Duration::from_secs(5),
            interrupt: Some(interrupt),
        },
        sink.clone(),
    )?;

    assert!(report.elapsed < Duration::from_secs(5));
    assert_eq!(sink.events().len(), 50);

    Ok(())
}
