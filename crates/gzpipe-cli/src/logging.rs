//! Tracing subscriber setup.

use crate::config::LogLevel;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Filter honoring `RUST_LOG` when set, `level` otherwise.
pub fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(Level::from(level)).into())
        .from_env_lossy()
}

/// Install the global subscriber.
///
/// Logs go to standard error so standard output carries only the summary line.
pub fn init(level: LogLevel) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}
