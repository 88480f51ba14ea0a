//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence over the configured filter, so a single run can
//! be made more verbose without touching configuration.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Errors raised while installing the global subscriber
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid log filter '{directive}': {reason}")]
    InvalidFilter { directive: String, reason: String },

    #[error("Tracing subscriber already installed: {0}")]
    AlreadyInstalled(String),
}

/// Builds the filter: `RUST_LOG` if set and valid, otherwise the configured level.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| TelemetryError::InvalidFilter {
        directive: config.level.clone(),
        reason: e.to_string(),
    })
}

/// Installs the global fmt subscriber (plain or JSON).
///
/// # Errors
///
/// Returns `TelemetryError` if the filter does not parse or a subscriber is
/// already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| TelemetryError::AlreadyInstalled(e.to_string()))
}
