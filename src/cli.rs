use clap::Parser;
use std::time::Duration;

use crate::config::Config;
use crate::trace::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "threadctl")]
#[command(about = "Start and cooperatively stop worker threads, tracing each lifecycle event", long_about = None)]
pub struct Cli {
    /// Number of workers to run, one after another
    #[arg(short = 'n', long, value_name = "N")]
    pub iterations: Option<usize>,

    /// Simulated work per worker, in milliseconds
    #[arg(short, long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Do not let Ctrl-C cut worker delays short
    #[arg(long)]
    pub no_ctrl_c: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Flags win over values loaded from the environment.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.work_delay = Duration::from_millis(delay_ms);
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        config
    }
}
