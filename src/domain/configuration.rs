//! Gateway configuration domain model.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Connection settings for the licensing backend, loaded from
/// `automate.toml` with environment overrides applied by the app layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Base URL of the backend API.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self { api_url: default_api_url(), timeout_secs: default_timeout_secs() }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::configuration("timeout_secs must be greater than 0"));
        }
        if self.api_url.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "api_url '{}' cannot be used as a base URL",
                self.api_url
            )));
        }
        Ok(())
    }
}

fn default_api_url() -> Url {
    // Matches the backend's local development binding.
    Url::parse("http://localhost:8080/capstone/").expect("Default API URL must be valid")
}

fn default_timeout_secs() -> u64 {
    30
}
