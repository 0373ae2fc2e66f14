use anyhow::Result;
use std::time::{Duration, Instant};
use threadctl::interrupt::spawn_ctrl_c_listener;
use threadctl::{Interrupt, Interrupted};
use tokio::time::timeout;

#[test]
fn test_sleep_runs_full_duration() {
    let interrupt = Interrupt::new();
    let started_at = Instant::now();

    assert_eq!(interrupt.sleep(Duration::from_millis(30)), Ok(()));
    assert!(started_at.elapsed() >= Duration::from_millis(30));
    assert!(!interrupt.is_triggered());
}

#[test]
fn test_sleep_after_trigger_returns_immediately() {
    let interrupt = Interrupt::new();
    interrupt.trigger();

    let started_at = Instant::now();
    assert_eq!(interrupt.sleep(Duration::from_secs(30)), Err(Interrupted));
    assert!(started_at.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn test_trigger_wakes_blocked_sleeper() -> Result<()> {
    let interrupt = Interrupt::new();

    let sleeper = interrupt.clone();
    let task = tokio::task::spawn_blocking(move || sleeper.sleep(Duration::from_secs(30)));

    tokio::time::sleep(Duration::from_millis(50)).await;
    interrupt.trigger();

    let result = timeout(Duration::from_secs(5), task).await??;
    assert_eq!(result, Err(Interrupted));
    assert!(interrupt.is_triggered());

    Ok(())
}

#[test]
fn test_ctrl_c_listener_leaves_interrupt_untriggered() -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let interrupt = Interrupt::new();

    spawn_ctrl_c_listener(&rt, interrupt.clone());
    std::thread::sleep(Duration::from_millis(50));

    assert!(!interrupt.is_triggered());
    assert_eq!(interrupt.sleep(Duration::from_millis(10)), Ok(()));

    drop(rt);
    assert!(!interrupt.is_triggered());

    Ok(())
}
