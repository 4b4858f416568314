//! Tracing subscriber setup.
//!
//! Log lines go to stderr so stdout stays clean for data output.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// `RUST_LOG` wins; otherwise the first of `levels` that is set, then
/// [`DEFAULT_LOG_LEVEL`].
pub fn build_filter(levels: &[Option<&str>]) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = levels
            .iter()
            .flatten()
            .next()
            .copied()
            .unwrap_or(DEFAULT_LOG_LEVEL);
        level
            .parse()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    })
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(levels: &[Option<&str>]) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(levels))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
