//! Snapshot layout and file handling

use crate::{PersistError, Result};
use drive_core::{DriveStore, Item, ViewMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current snapshot layout version
pub const SNAPSHOT_VERSION: u32 = 1;

/// The persisted subset of store state
///
/// Flat JSON, one record per drive, items in store insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: u32,
    pub items: Vec<Item>,
    pub view_mode: ViewMode,
    pub dark_mode: bool,
}

impl Snapshot {
    /// Capture the durable subset of a store
    pub fn capture(store: &DriveStore) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            items: store.items().to_vec(),
            view_mode: store.view_mode(),
            dark_mode: store.dark_mode(),
        }
    }
}

/// A snapshot file on disk
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-save never leaves a truncated snapshot behind.
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default snapshot location under the application data directory
    pub fn default_path() -> PathBuf {
        crate::data_dir().join("drive.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the snapshot; `Ok(None)` when the file does not exist yet
    pub fn load(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(PersistError::Version(snapshot.version));
        }

        tracing::info!(
            path = %self.path.display(),
            items = snapshot.items.len(),
            "snapshot loaded"
        );
        Ok(Some(snapshot))
    }

    /// Write the snapshot atomically
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }

    /// Remove the snapshot file if present
    pub fn remove(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drive_core::seed;

    fn scratch_file(dir: &tempfile::TempDir) -> SnapshotFile {
        SnapshotFile::new(dir.path().join("drive.json"))
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scratch_file(&dir).load().unwrap().is_none());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = scratch_file(&dir);

        let store = DriveStore::with_items(seed::demo_items(), 1 << 40, ViewMode::List, true);
        let snapshot = Snapshot::capture(&store);
        file.save(&snapshot).unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded.items, snapshot.items);
        assert_eq!(loaded.view_mode, ViewMode::List);
        assert!(loaded.dark_mode);
    }

    #[test]
    fn test_corrupt_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = scratch_file(&dir);
        std::fs::write(file.path(), "not json").unwrap();

        assert!(matches!(file.load(), Err(PersistError::Serde(_))));
    }

    #[test]
    fn test_version_mismatch_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = scratch_file(&dir);

        let mut snapshot = Snapshot::capture(&DriveStore::new(1 << 40, ViewMode::Grid));
        snapshot.version = 99;
        file.save(&snapshot).unwrap();

        assert!(matches!(file.load(), Err(PersistError::Version(99))));
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = scratch_file(&dir);
        file.save(&Snapshot::capture(&DriveStore::new(1, ViewMode::Grid)))
            .unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["drive.json"]);
    }
}
