//! Structured logging setup

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{TrackerError, TrackerResult};

/// Build the filter for `config`
fn env_filter(config: &LoggingConfig) -> TrackerResult<EnvFilter> {
    EnvFilter::try_new(&config.filter)
        .map_err(|e| TrackerError::config(format!("invalid log filter '{}': {}", config.filter, e)))
}

/// Install the global `tracing` subscriber
///
/// Fails if a subscriber is already installed or the filter does not parse.
pub fn init_logging(config: &LoggingConfig) -> TrackerResult<()> {
    let registry = tracing_subscriber::registry().with(env_filter(config)?);

    let installed = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true).with_target(true))
            .try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
    };
    installed.map_err(|e| TrackerError::config(format!("logging already initialized: {}", e)))?;

    tracing::info!(
        service = crate::NAME,
        version = crate::VERSION,
        filter = %config.filter,
        "logging initialized"
    );
    Ok(())
}
