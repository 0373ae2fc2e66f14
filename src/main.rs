use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use threadctl::cli::Cli;
use threadctl::interrupt::{spawn_ctrl_c_listener, Interrupt};
use threadctl::{driver, Config, ConsoleSink, DriverConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse_args();
    let config = cli.apply(Config::load()?);
    tracing::debug!("Loaded config: {:?}", config);

    let interrupt = Interrupt::new();

    // Held until the driver finishes so the Ctrl-C listener stays armed.
    let _rt = if cli.no_ctrl_c {
        None
    } else {
        let rt = tokio::runtime::Runtime::new().context("Failed to create signal runtime")?;
        spawn_ctrl_c_listener(&rt, interrupt.clone());
        Some(rt)
    };

    let sink = ConsoleSink::new(config.format);
    if let Some(banner) = sink.banner() {
        println!("{}", banner);
    }

    let report = driver::run(
        &DriverConfig {
            iterations: config.iterations,
            work_delay: config.work_delay,
            interrupt: Some(interrupt),
        },
        Arc::new(sink),
    )?;

    sink.print_elapsed(report.elapsed);

    Ok(())
}
