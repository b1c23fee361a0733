//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber.
///
/// The filter comes from `RUST_LOG` and falls back to `warn`, so a plain run only shows
/// stock shortages and failures. Output is compact, without module targets (the actor
/// loop logs an `entity_type` field instead), and goes to stderr.
///
/// Panics if a global subscriber is already installed.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
