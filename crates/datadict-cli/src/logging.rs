//! Tracing subscriber setup.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Build an `EnvFilter` from the given level, respecting the `RUST_LOG` env var.
fn build_env_filter(level: Level) -> EnvFilter {
    let level = level.as_str().to_lowercase();

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Dependencies stay at warn to reduce noise
        EnvFilter::new(format!("warn,datadict={level},datadict_cli={level}", level = level))
    })
}

/// Install the global subscriber. Logs go to stderr so command output stays clean.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    let _ = fmt()
        .with_env_filter(build_env_filter(level))
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
}
