//! Tracing subscriber setup shared by the binaries

use tracing_subscriber::EnvFilter;

/// Installs a global `fmt` subscriber writing to stderr.
///
/// `RUST_LOG` wins over `default_level` when it is set and parses.
/// Panics if a global subscriber is already installed; call once, from `main`.
pub fn tracing_subscribe_boilerplate(default_level: impl Into<String>) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level.into()));
        tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
}
