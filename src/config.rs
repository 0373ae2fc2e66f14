use anyhow::{Context, Result};
use std::time::Duration;

use crate::trace::OutputFormat;
use crate::worker::DEFAULT_WORK_DELAY;

pub const DEFAULT_ITERATIONS: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub iterations: usize,
    pub work_delay: Duration,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            work_delay: DEFAULT_WORK_DELAY,
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source; unset keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(value) = lookup("THREADCTL_ITERATIONS") {
            config.iterations = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid THREADCTL_ITERATIONS value {:?}", value))?;
        }

        if let Some(value) = lookup("THREADCTL_WORK_DELAY_MS") {
            let millis: u64 = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid THREADCTL_WORK_DELAY_MS value {:?}", value))?;
            config.work_delay = Duration::from_millis(millis);
        }

        if let Some(value) = lookup("THREADCTL_FORMAT") {
            config.format = match OutputFormat::parse(value.trim()) {
                Some(format) => format,
                None => anyhow::bail!(
                    "Invalid THREADCTL_FORMAT value {:?} (expected \"text\" or \"json\")",
                    value
                ),
            };
        }

        Ok(config)
    }
}
