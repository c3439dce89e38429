//! Diagnostic logging.
//!
//! Logs go to stderr so they never mix with command output. The filter comes
//! from `SOLIDARITY_LOG` (e.g. `debug`, `solidarity::storage=trace`) and
//! defaults to warnings only.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "SOLIDARITY_LOG";

/// Install the global subscriber. Call once, before anything logs.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
