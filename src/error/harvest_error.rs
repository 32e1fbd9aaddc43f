//! Unified error type for the delivery and storage boundary.

use std::fmt;

use super::category::ErrorCategory;
use super::config::ConfigError;
use super::network::NetworkError;
use super::storage::StorageError;

/// Unified error type.
///
/// Tokenizing, projecting and extracting are total and never produce one of
/// these; only delivery, settings storage and configuration can fail.
#[derive(Debug)]
pub enum HarvestError {
    /// Transport or backend errors.
    Network(NetworkError),

    /// Settings storage errors.
    Storage(StorageError),

    /// Configuration errors.
    Config(ConfigError),

    /// A payload could not be serialized.
    Serialization(String),
}

impl HarvestError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            HarvestError::Network(err) if err.is_server_side() => ErrorCategory::Server,
            HarvestError::Network(_) => ErrorCategory::Network,
            HarvestError::Storage(_) => ErrorCategory::System,
            HarvestError::Config(_) => ErrorCategory::Configuration,
            HarvestError::Serialization(_) => ErrorCategory::Client,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            HarvestError::Network(err) => err.is_retryable(),
            _ => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            HarvestError::Network(err) => err.user_message(),
            HarvestError::Storage(err) => err.user_message(),
            HarvestError::Config(err) => err.to_string(),
            HarvestError::Serialization(message) => {
                format!("Could not serialize the payload: {}", message)
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            HarvestError::Network(err) => err.error_code(),
            HarvestError::Storage(err) => err.error_code(),
            HarvestError::Config(err) => err.error_code(),
            HarvestError::Serialization(_) => "E_SERIALIZE",
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for HarvestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarvestError::Network(err) => write!(f, "{}", err),
            HarvestError::Storage(err) => write!(f, "{}", err),
            HarvestError::Config(err) => write!(f, "{}", err),
            HarvestError::Serialization(message) => write!(f, "Serialization error: {}", message),
        }
    }
}

impl std::error::Error for HarvestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HarvestError::Network(err) => Some(err),
            HarvestError::Storage(err) => Some(err),
            HarvestError::Config(err) => Some(err),
            HarvestError::Serialization(_) => None,
        }
    }
}

impl From<NetworkError> for HarvestError {
    fn from(err: NetworkError) -> Self {
        HarvestError::Network(err)
    }
}

impl From<StorageError> for HarvestError {
    fn from(err: StorageError) -> Self {
        HarvestError::Storage(err)
    }
}

impl From<ConfigError> for HarvestError {
    fn from(err: ConfigError) -> Self {
        HarvestError::Config(err)
    }
}

impl From<serde_json::Error> for HarvestError {
    fn from(err: serde_json::Error) -> Self {
        HarvestError::Serialization(err.to_string())
    }
}
