pub mod cli;
pub mod config;
pub mod driver;
pub mod interrupt;
pub mod trace;
pub mod worker;

pub use config::Config;
pub use driver::{DriverConfig, RunReport};
pub use interrupt::{Interrupt, Interrupted};
pub use trace::{ConsoleSink, OutputFormat, RecordingSink, TraceEvent, TraceSink};
pub use worker::{Worker, WorkerConfig, WorkerState};
