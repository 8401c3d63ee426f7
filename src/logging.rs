//! Logging setup
//!
//! Diagnostics go to stderr through `tracing`. `RUST_LOG` takes precedence
//! over the configured level.

use tracing_subscriber::{EnvFilter, fmt};

/// Build the filter for a configured level name (case-insensitive)
pub fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.trim().to_lowercase()))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Safe to call more than once.
///
/// `ansi` is off for production deployments whose stderr goes to a file.
pub fn init(level: &str, ansi: bool) {
    let _ = fmt()
        .with_env_filter(filter_for(level))
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .try_init();
}
