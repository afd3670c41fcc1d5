//! Process-wide tracing setup for the dashboard service.

use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("'{value}' is not a valid tracing filter")]
    Filter {
        value: String,
        source: ParseError,
    },
    #[error("failed to install tracing subscriber: {0}")]
    Install(Box<dyn std::error::Error + Send + Sync>),
}

fn filter_from(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    // RUST_LOG wins over the configured filter when present.
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.log_filter).map_err(|source| TelemetryError::Filter {
        value: config.log_filter.clone(),
        source,
    })
}

/// Installs the global subscriber; compact single-line output without ANSI
/// escapes so logs stay grep-friendly in container runtimes.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = filter_from(config)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Install)
}
