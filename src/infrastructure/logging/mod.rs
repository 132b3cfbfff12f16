use crate::infrastructure::config::{Config, LogFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "platinum_client=debug";

/// Install the global tracing subscriber.
///
/// Safe to call more than once: later calls leave the first subscriber in place.
pub fn init_logging(config: &Config) {
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into())
    };

    let result = if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter())
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter())
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
