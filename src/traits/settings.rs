//! Settings store trait abstraction.
//!
//! Delivery reads a handful of small string settings (user name, brand name,
//! cached client IP). Where they live is up to the implementation.

use async_trait::async_trait;

use crate::error::StorageError;

/// Cached public IP of this client.
pub const KEY_CLIENT_IP: &str = "clientIp";
/// User name attached to every payload.
pub const KEY_USER_NAME: &str = "userName";
/// Brand name attached to every payload.
pub const KEY_BRAND_NAME: &str = "brandName";

/// Key/value storage for delivery settings.
///
/// A missing key is `Ok(None)`, not an error.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read a setting.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a setting, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a setting. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
