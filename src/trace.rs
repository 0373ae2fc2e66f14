use chrono::{DateTime, Local};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    Start,
    AlreadyStarted,
    AlreadyStopped,
    Begin { task: String },
    End { task: String },
    Stopped,
}

impl TraceEvent {
    pub fn event_type(&self) -> &str {
        match self {
            TraceEvent::Start => "start",
            TraceEvent::AlreadyStarted => "already_started",
            TraceEvent::AlreadyStopped => "already_stopped",
            TraceEvent::Begin { .. } => "begin",
            TraceEvent::End { .. } => "end",
            TraceEvent::Stopped => "stopped",
        }
    }

    pub fn task(&self) -> Option<&str> {
        match self {
            TraceEvent::Begin { task } | TraceEvent::End { task } => Some(task),
            _ => None,
        }
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Start => write!(f, "Thread start"),
            TraceEvent::AlreadyStarted => write!(f, "Thread already started"),
            TraceEvent::AlreadyStopped => write!(f, "Thread already stopped"),
            TraceEvent::Begin { task } => write!(f, "Thread begin {}", task),
            TraceEvent::End { task } => write!(f, "Thread end {}", task),
            TraceEvent::Stopped => write!(f, "Thread stopped"),
        }
    }
}

/// Destination for worker lifecycle events.
///
/// A sink is shared between a [`Worker`](crate::Worker) and the thread it
/// spawns, so `record` may be called from either side.
pub trait TraceSink: Send + Sync {
    fn record(&self, event: TraceEvent);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct JsonLine<'a> {
    timestamp: DateTime<Local>,
    #[serde(flatten)]
    event: &'a TraceEvent,
}

#[derive(Serialize)]
struct JsonSummary {
    timestamp: DateTime<Local>,
    event: &'static str,
    elapsed_ms: u128,
}

/// Writes one stdout line per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink {
    format: OutputFormat,
}

impl ConsoleSink {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Header line printed before the first worker; JSON output has none.
    pub fn banner(&self) -> Option<&'static str> {
        match self.format {
            OutputFormat::Text => Some("Start test"),
            OutputFormat::Json => None,
        }
    }

    pub fn render(&self, event: &TraceEvent) -> String {
        match self.format {
            OutputFormat::Text => event.to_string(),
            OutputFormat::Json => {
                let line = JsonLine {
                    timestamp: Local::now(),
                    event,
                };
                serde_json::to_string(&line).unwrap_or_else(|e| {
                    tracing::error!("Failed to serialize trace event: {}", e);
                    event.to_string()
                })
            }
        }
    }

    pub fn render_elapsed(&self, elapsed: Duration) -> String {
        match self.format {
            OutputFormat::Text => format!("Test execution time: {}ms", elapsed.as_millis()),
            OutputFormat::Json => {
                let summary = JsonSummary {
                    timestamp: Local::now(),
                    event: "finished",
                    elapsed_ms: elapsed.as_millis(),
                };
                serde_json::to_string(&summary).unwrap_or_else(|e| {
                    tracing::error!("Failed to serialize run summary: {}", e);
                    format!("Test execution time: {}ms", elapsed.as_millis())
                })
            }
        }
    }

    pub fn print_elapsed(&self, elapsed: Duration) {
        println!("{}", self.render_elapsed(elapsed));
    }
}

impl TraceSink for ConsoleSink {
    fn record(&self, event: TraceEvent) {
        tracing::debug!(event = event.event_type(), task = event.task(), "trace");
        println!("{}", self.render(&event));
    }
}

/// Keeps every event in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<TraceEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TraceEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl TraceSink for RecordingSink {
    fn record(&self, event: TraceEvent) {
        tracing::debug!(event = event.event_type(), task = event.task(), "trace");
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}
