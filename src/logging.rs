//! Log output goes to a file; stdout belongs to the terminal UI.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber: `RUST_LOG` filter (default `info`), plain
/// text appended to `log_file`.
pub fn init_logging(log_file: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("opening log file {}", log_file.display()))?;

    tracing_subscriber::registry()
        .with(filter())
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false).with_target(false))
        .try_init()
        .context("installing log subscriber")?;
    Ok(())
}
