//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PROJECT_MANAGER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use project_manager::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Syncing projects from {}", config.api.base_url);
//! ```

mod api;
mod error;
mod logging;
mod store;

pub use api::ApiConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use store::StoreConfig;

use serde::Deserialize;
use std::path::Path;

/// Environment variable prefix
const ENV_PREFIX: &str = "PROJECT_MANAGER";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// configuration pointing at `http://127.0.0.1:9393`.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Remote project API (base URL, timeout)
    #[serde(default)]
    pub api: ApiConfig,

    /// Project store behaviour
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging (filter, output format)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PROJECT_MANAGER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PROJECT_MANAGER__API__BASE_URL=http://localhost:9393` -> `api.base_url`
    /// - `PROJECT_MANAGER__STORE__RECONCILE_ON_FAILURE=true` -> `store.reconcile_on_failure`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(env_source())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration from a file, with environment variables on top
    ///
    /// The format (TOML, YAML, JSON) follows the file extension.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or malformed, or values
    /// cannot be parsed into expected types.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

fn env_source() -> config::Environment {
    config::Environment::default()
        .prefix(ENV_PREFIX)
        .separator("__")
}
