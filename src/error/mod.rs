//! Error handling for the delivery, storage and configuration boundary.
//!
//! - **Error Categories**: high-level classification for handling decisions
//! - **Domain-specific Errors**: network, storage and configuration errors
//! - **Unified Error Type**: `HarvestError` consolidates all of them
//! - **Result Type Alias**: `HarvestResult<T>`
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout | Yes |
//! | Server | Backend status errors, missing acknowledgement | Sometimes |
//! | Client | Unserializable payloads | No |
//! | System | Settings file errors | No |
//! | Configuration | Bad environment values | No |

mod category;
mod config;
mod harvest_error;
mod network;
mod result;
mod storage;

pub use category::ErrorCategory;
pub use config::ConfigError;
pub use harvest_error::HarvestError;
pub use network::NetworkError;
pub use result::HarvestResult;
pub use storage::{classify_io_error, StorageError};

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_error_unification() {
        let net_err: HarvestError = NetworkError::Timeout {
            operation: "ip lookup".to_string(),
            duration_secs: 5,
        }
        .into();
        let nack_err: HarvestError = NetworkError::NotAcknowledged {
            body: "{}".to_string(),
        }
        .into();
        let store_err: HarvestError = StorageError::NoDataDirectory.into();
        let cfg_err: HarvestError = ConfigError::NoDataDirectory.into();

        assert_eq!(net_err.category(), ErrorCategory::Network);
        assert_eq!(nack_err.category(), ErrorCategory::Server);
        assert_eq!(store_err.category(), ErrorCategory::System);
        assert_eq!(cfg_err.category(), ErrorCategory::Configuration);

        for err in [&net_err, &nack_err, &store_err, &cfg_err] {
            assert!(!err.error_code().is_empty());
            assert!(!err.user_message().is_empty());
        }
    }

    #[test]
    fn test_retry_logic() {
        let retryable: HarvestError = NetworkError::HttpStatus {
            status: 503,
            message: "unavailable".to_string(),
        }
        .into();
        assert!(retryable.is_retryable());

        let permanent: HarvestError = StorageError::NoDataDirectory.into();
        assert!(!permanent.is_retryable());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: HarvestError = json_err.into();
        assert!(matches!(err, HarvestError::Serialization(_)));
        assert_eq!(err.category(), ErrorCategory::Client);
    }
}
