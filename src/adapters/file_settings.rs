//! JSON-file settings store.
//!
//! Settings live in a single flat JSON object, by default at
//! `<data_dir>/harvest/settings.json`. Non-string values in the file are
//! ignored on read.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::config::HarvestConfig;
use crate::error::{classify_io_error, StorageError};
use crate::traits::SettingsStore;

/// File-backed [`SettingsStore`].
///
/// Every call reads the file fresh, so edits made by hand between runs are
/// picked up. Writes go through a temp file and a rename.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSettingsStore {
    /// Store backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store at the configured (or default) settings path.
    pub fn from_config(config: &HarvestConfig) -> Result<Self, StorageError> {
        config
            .resolved_settings_path()
            .map(Self::new)
            .map_err(|_| StorageError::NoDataDirectory)
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Map<String, Value>, StorageError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(classify_io_error(&e, "read", &self.path)),
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StorageError::Corrupt {
                path: self.path.clone(),
                message: "expected a JSON object".to_string(),
            }),
            Err(e) => Err(StorageError::Corrupt {
                path: self.path.clone(),
                message: e.to_string(),
            }),
        }
    }

    async fn store(&self, map: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| classify_io_error(&e, "create directory", parent))?;
        }

        let contents = serde_json::to_string_pretty(map).map_err(|e| StorageError::Io {
            operation: "serialize settings".to_string(),
            path: Some(self.path.clone()),
            message: e.to_string(),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, contents)
            .await
            .map_err(|e| classify_io_error(&e, "write", &tmp))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| classify_io_error(&e, "replace", &self.path))
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.load().await?;
        Ok(map.get(key).and_then(Value::as_str).map(str::to_string))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load().await?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.store(&map).await?;
        tracing::debug!(key, path = %self.path.display(), "setting saved");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load().await?;
        if map.remove(key).is_some() {
            self.store(&map).await?;
        }
        Ok(())
    }
}
