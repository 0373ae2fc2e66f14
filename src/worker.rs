use anyhow::{Context, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::interrupt::Interrupt;
use crate::trace::{TraceEvent, TraceSink};

pub const DEFAULT_WORK_DELAY: Duration = Duration::from_millis(100);

static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Running,
    Stopped,
}

impl WorkerState {
    pub fn is_running(&self) -> bool {
        matches!(self, WorkerState::Running)
    }
}

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub work_delay: Duration,
    pub interrupt: Option<Interrupt>,
}

/// A background thread with an explicit start/stop lifecycle.
///
/// `stop` never kills the thread: it waits for the task body to finish on
/// its own. Both `start` and `stop` may be called redundantly. The handle
/// is present exactly while the state is [`WorkerState::Running`].
///
/// `Start` is recorded only once the thread exists; the task body holds
/// off on `Begin` until then.
///
/// `start` and `stop` take `&mut self`, so a single Worker is only ever
/// driven from one thread at a time.
pub struct Worker {
    sink: Arc<dyn TraceSink>,
    config: WorkerConfig,
    state: WorkerState,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    pub fn new(sink: Arc<dyn TraceSink>, config: WorkerConfig) -> Self {
        Self {
            sink,
            config,
            state: WorkerState::Stopped,
            handle: None,
        }
    }

    pub fn with_delay(sink: Arc<dyn TraceSink>, work_delay: Duration) -> Self {
        Self::new(
            sink,
            WorkerConfig {
                work_delay,
                interrupt: None,
            },
        )
    }

    pub fn start(&mut self) -> Result<()> {
        if self.state.is_running() {
            tracing::warn!("Worker is already running, ignoring start");
            self.sink.record(TraceEvent::AlreadyStarted);
            return Ok(());
        }

        let name = format!("worker-{}", NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed));
        let sink = self.sink.clone();
        let work_delay = self.config.work_delay;
        let interrupt = self.config.interrupt.clone();
        let started = Arc::new(Barrier::new(2));
        let started_for_task = started.clone();

        let handle = std::thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                started_for_task.wait();
                run(sink, name, work_delay, interrupt)
            })
            .context("Failed to spawn worker thread")?;

        self.sink.record(TraceEvent::Start);
        started.wait();

        self.handle = Some(handle);
        self.state = WorkerState::Running;

        Ok(())
    }

    pub fn stop(&mut self) {
        if !self.state.is_running() {
            self.sink.record(TraceEvent::AlreadyStopped);
            return;
        }

        if let Some(handle) = self.handle.take() {
            let task = handle.thread().name().unwrap_or("worker").to_string();
            if let Err(e) = handle.join() {
                tracing::error!("Worker thread {} panicked: {:?}", task, e);
            }
        }

        self.sink.record(TraceEvent::Stopped);
        self.state = WorkerState::Stopped;
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        if self.state.is_running() {
            tracing::debug!("Worker dropped while running, joining");
            self.stop();
        }
    }
}

fn run(sink: Arc<dyn TraceSink>, task: String, work_delay: Duration, interrupt: Option<Interrupt>) {
    sink.record(TraceEvent::Begin { task: task.clone() });

    match interrupt {
        Some(interrupt) => {
            // Interruption ends the work early but is not reported upward.
            if let Err(e) = interrupt.sleep(work_delay) {
                tracing::debug!("Worker {}: {}", task, e);
            }
        }
        None => std::thread::sleep(work_delay),
    }

    sink.record(TraceEvent::End { task });
}
