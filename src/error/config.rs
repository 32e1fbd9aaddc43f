//! Configuration errors.

use thiserror::Error;

/// Errors raised while building a [`HarvestConfig`](crate::config::HarvestConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{variable} is not a valid URL: {value}")]
    InvalidUrl { variable: String, value: String },

    #[error("{variable} must be a whole number of seconds, got {value:?}")]
    InvalidTimeout { variable: String, value: String },

    #[error("Could not determine a data directory for the settings file")]
    NoDataDirectory,
}

impl ConfigError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::InvalidUrl { .. } => "E_CFG_URL",
            ConfigError::InvalidTimeout { .. } => "E_CFG_TIMEOUT",
            ConfigError::NoDataDirectory => "E_CFG_NO_DIR",
        }
    }
}
