//! Gateway configuration loading for the CLI.

use std::fs;
use std::path::Path;

use crate::domain::{AppError, GatewayConfig};

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "automate.toml";
/// Environment override for the backend base URL.
pub const API_URL_ENV: &str = "AUTOMATE_API_URL";
/// Environment override for the request timeout.
pub const API_TIMEOUT_ENV: &str = "AUTOMATE_API_TIMEOUT_SECS";

/// Load configuration: `automate.toml` when present, then environment
/// overrides, then validation.
pub fn load() -> Result<GatewayConfig, AppError> {
    load_from(Path::new(CONFIG_FILE))
}

pub fn load_from(path: &Path) -> Result<GatewayConfig, AppError> {
    let mut config = if path.exists() {
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| AppError::configuration(format!("{}: {}", path.display(), e)))?
    } else {
        GatewayConfig::default()
    };

    if let Ok(raw) = std::env::var(API_URL_ENV) {
        config.api_url = raw
            .parse()
            .map_err(|e| AppError::configuration(format!("{}: {}", API_URL_ENV, e)))?;
    }
    if let Ok(raw) = std::env::var(API_TIMEOUT_ENV) {
        config.timeout_secs = raw
            .parse()
            .map_err(|_| AppError::configuration(format!("{} must be an integer", API_TIMEOUT_ENV)))?;
    }

    config.validate()?;
    Ok(config)
}
