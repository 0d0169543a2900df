//! Tracing setup

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber
///
/// `RUST_LOG` wins when set; otherwise `level` applies to this crate. Events
/// go to stderr so command output on stdout stays clean. Only the first call
/// has any effect.
pub fn init_tracing(level: &str) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(format!("tally={}", level)))
            .unwrap_or_else(|_| EnvFilter::new("tally=warn"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
