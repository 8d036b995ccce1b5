//! Diagnostic logging setup
//!
//! Logs go to stderr so they never mix with completions or other stdout output.
//! `RUST_LOG` takes precedence over `--verbose`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn default_level(verbose: bool) -> &'static str {
    if verbose { "pyex=debug" } else { "warn" }
}

fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(build_env_filter(default_level(verbose)))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();
}
