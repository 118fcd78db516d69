use crate::infra::config;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber.
/// - Respects `RUST_LOG` if set
/// - Falls back to [`config::default_log_filter`]
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter()));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init();
}
