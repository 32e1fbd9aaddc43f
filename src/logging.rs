//! Tracing subscriber setup for the binary.
//!
//! Library code only emits events; installing a subscriber is left to the
//! binary so embedders keep control of their own output.

use tracing_subscriber::EnvFilter;

/// Filter variable consulted first.
pub const LOG_ENV: &str = "HARVEST_LOG";

const DEFAULT_FILTER: &str = "info";

/// Build the filter from `HARVEST_LOG`, then `RUST_LOG`, then `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a fmt subscriber writing to stderr, keeping stdout for JSON.
///
/// Calling it twice is harmless; the second install is ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
