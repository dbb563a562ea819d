// src/cli/logging.rs
//! Stderr logging for the binary.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "warn";

/// Picks the filter directive. Precedence: `--log-level`, then `-v`, then
/// `RUST_LOG`, then `warn`.
#[must_use]
pub fn directive(verbose: bool, level: Option<&str>, env: Option<&str>) -> String {
    level
        .or(verbose.then_some("debug"))
        .or(env)
        .unwrap_or(DEFAULT_DIRECTIVE)
        .to_string()
}

/// Installs the global subscriber. Logs go to stderr so reports on stdout
/// stay machine-readable.
pub fn init(verbose: bool, level: Option<&str>) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::try_new(directive(verbose, level, env.as_deref()))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
