//! `tracing` setup. Logs always go to stderr so stdout stays parseable.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Default filter: quiet unless `--verbose`.
#[must_use]
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "tavily=debug,warn" } else { "warn" }
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
///
/// Later calls are no-ops.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .try_init();
}
