//! Settings storage error types.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Errors raised by a [`SettingsStore`](crate::traits::SettingsStore).
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Permission denied for file operation.
    PermissionDenied { path: PathBuf, operation: String },

    /// Generic I/O error.
    Io {
        operation: String,
        path: Option<PathBuf>,
        message: String,
    },

    /// The settings file exists but is not a JSON object.
    Corrupt { path: PathBuf, message: String },

    /// Could not determine the platform data directory.
    NoDataDirectory,
}

impl StorageError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StorageError::PermissionDenied { path, operation } => format!(
                "Permission denied: cannot {} '{}'.",
                operation,
                path.display()
            ),
            StorageError::Io { operation, path, .. } => match path {
                Some(p) => format!("Failed to {} '{}'", operation, p.display()),
                None => format!("Failed to {}", operation),
            },
            StorageError::Corrupt { path, .. } => format!(
                "The settings file '{}' is not valid JSON. Fix or delete it.",
                path.display()
            ),
            StorageError::NoDataDirectory => {
                "Could not determine a data directory. Set HARVEST_SETTINGS_PATH.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::PermissionDenied { .. } => "E_STORE_PERM",
            StorageError::Io { .. } => "E_STORE_IO",
            StorageError::Corrupt { .. } => "E_STORE_CORRUPT",
            StorageError::NoDataDirectory => "E_STORE_NO_DIR",
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::PermissionDenied { path, operation } => {
                write!(f, "Permission denied: cannot {} '{}'", operation, path.display())
            }
            StorageError::Io {
                operation,
                path,
                message,
            } => match path {
                Some(p) => write!(f, "Failed to {} '{}': {}", operation, p.display(), message),
                None => write!(f, "Failed to {}: {}", operation, message),
            },
            StorageError::Corrupt { path, message } => {
                write!(f, "Corrupt settings file '{}': {}", path.display(), message)
            }
            StorageError::NoDataDirectory => write!(f, "Could not determine data directory"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Classify an I/O error raised while touching `path`.
pub fn classify_io_error(err: &io::Error, operation: &str, path: &Path) -> StorageError {
    match err.kind() {
        io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
            path: path.to_path_buf(),
            operation: operation.to_string(),
        },
        _ => StorageError::Io {
            operation: operation.to_string(),
            path: Some(path.to_path_buf()),
            message: err.to_string(),
        },
    }
}
