//! In-memory settings store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::StorageError;
use crate::traits::SettingsStore;

/// [`SettingsStore`] backed by a shared map.
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// delivery wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<Mutex<bool>>,
}

impl MemorySettingsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `pairs`.
    pub fn with_values<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        }
        store
    }

    /// Make every subsequent `set`/`remove` fail.
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_writes.lock() {
            *flag = fail;
        }
    }

    /// Snapshot of the stored value for `key`.
    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().ok().and_then(|v| v.get(key).cloned())
    }

    fn poisoned() -> StorageError {
        StorageError::Io {
            operation: "lock settings".to_string(),
            path: None,
            message: "settings lock poisoned".to_string(),
        }
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        let fail = *self.fail_writes.lock().map_err(|_| Self::poisoned())?;
        if fail {
            return Err(StorageError::Io {
                operation: "write setting".to_string(),
                path: None,
                message: "writes disabled".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().map_err(|_| Self::poisoned())?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        let mut values = self.values.lock().map_err(|_| Self::poisoned())?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        let mut values = self.values.lock().map_err(|_| Self::poisoned())?;
        values.remove(key);
        Ok(())
    }
}
