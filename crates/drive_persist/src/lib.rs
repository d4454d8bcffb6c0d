//! NAS Drive Persistence Layer
//!
//! Serializes the durable subset of the store (items, view mode, dark-mode
//! flag) as a single JSON snapshot under the application data directory, and
//! wraps the store in a save-on-mutation service. Navigation, selection and
//! other session state are deliberately not persisted.

mod service;
mod snapshot;

pub use service::PersistentDrive;
pub use snapshot::{Snapshot, SnapshotFile, SNAPSHOT_VERSION};

use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

/// Persistence errors
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("unsupported snapshot version: {0}")]
    Version(u32),
}

pub type Result<T> = std::result::Result<T, PersistError>;

/// Get the application data directory
pub fn data_dir() -> PathBuf {
    ProjectDirs::from("com", "NasDrive", "NasDrive")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./data"))
}
