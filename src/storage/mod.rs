//! Persistent storage
//!
//! This module handles all data persistence: the key-value backends, the media
//! library built on top of them, and the application settings.

pub mod backend;
pub mod library;
pub mod settings;

use std::path::PathBuf;
use thiserror::Error;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use library::{MediaLibrary, RecordStore};

/// Overrides the platform data directory when set
pub const DATA_DIR_ENV: &str = "GENFINITY_DATA_DIR";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not determine a data directory")]
    NoDataDir,
}

/// Get the application data directory
///
/// Linux: ~/.local/share/genfinity, macOS: ~/Library/Application Support/com.Genfinity.Genfinity,
/// Windows: %APPDATA%\Genfinity\Genfinity\data
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    directories::ProjectDirs::from("com", "Genfinity", "Genfinity")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::NoDataDir)
}
