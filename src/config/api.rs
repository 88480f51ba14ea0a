//! Remote project API configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Longest request timeout accepted, in seconds
const MAX_TIMEOUT_SECS: u64 = 300;

/// Remote project API configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base address of the collection resource (`/projects` is appended)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds; unset means no timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// Get timeout as Duration, if configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("API__BASE_URL"));
        }
        let rest = self
            .base_url
            .strip_prefix("http://")
            .or_else(|| self.base_url.strip_prefix("https://"))
            .ok_or(ValidationError::InvalidBaseUrl)?;
        if rest.is_empty() || rest.starts_with('/') {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if let Some(secs) = self.timeout_secs {
            if secs == 0 || secs > MAX_TIMEOUT_SECS {
                return Err(ValidationError::InvalidTimeout);
            }
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:9393".to_string()
}
