use std::fmt;
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

/// Returned by [`Interrupt::sleep`] when the wait was cut short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupted;

impl fmt::Display for Interrupted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sleep interrupted")
    }
}

impl std::error::Error for Interrupted {}

/// Process-wide interruption flag that wakes sleeping worker tasks.
///
/// Once triggered it stays triggered; every later `sleep` returns at once.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        let (lock, cvar) = &*self.inner;
        let mut triggered = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *triggered = true;
        cvar.notify_all();
    }

    pub fn is_triggered(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn sleep(&self, duration: Duration) -> Result<(), Interrupted> {
        let deadline = Instant::now() + duration;
        let (lock, cvar) = &*self.inner;
        let mut triggered = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        // Loop guards against spurious wakeups.
        while !*triggered {
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            let (guard, _) = cvar
                .wait_timeout(triggered, deadline - now)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            triggered = guard;
        }

        Err(Interrupted)
    }
}

/// Triggers `interrupt` when the process receives Ctrl-C.
pub fn spawn_ctrl_c_listener(rt: &tokio::runtime::Runtime, interrupt: Interrupt) {
    rt.spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::warn!("Ctrl-C received, interrupting worker delays");
                interrupt.trigger();
            }
            Err(e) => {
                tracing::error!("Failed to listen for Ctrl-C: {}", e);
            }
        }
    });
}
