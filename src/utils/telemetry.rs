//! Logging setup
//! 
//! fmt subscriber filtered by `RUST_LOG`, falling back to the configured
//! directive.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Install the global subscriber. Safe to call more than once; later calls
/// are no-ops.
pub fn init_logging(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("ib_vault=info"));

    // Logs go to stderr so command output stays pipeable
    let _ = Registry::default()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
