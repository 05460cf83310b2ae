//! Tracing subscriber setup for the hosting command-line tool.
//!
//! The library itself only emits `tracing` events; installing a subscriber is left to
//! the binary. These helpers give the tools a consistent default.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter directive (e.g. `debug` or
/// `hugegraph_tools_client=trace`)
pub const LOG_ENV: &str = "HUGEGRAPH_TOOLS_LOG";

/// Default directive when [`LOG_ENV`] is unset or invalid
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Build the filter from [`LOG_ENV`], falling back to [`DEFAULT_DIRECTIVE`]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install a compact stderr subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already set.
pub fn try_init() -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
    fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
}

/// Install the subscriber, ignoring an already-installed one
pub fn init() {
    let _ = try_init();
}
