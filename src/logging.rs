//! Tracing subscriber setup.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directive for the given verbosity flags.
pub fn default_level(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    }
}

/// Builds the event filter, letting `RUST_LOG` override the flag level.
fn build_env_filter(verbose: bool, quiet: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose, quiet)))
}

/// Installs the global subscriber writing compact logs to stderr.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init_logging(verbose: bool, quiet: bool) -> Result<()> {
    tracing_subscriber::registry()
        .with(build_env_filter(verbose, quiet))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize logging")
}
