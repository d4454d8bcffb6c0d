//! Save-on-mutation wrapper around the drive store

use crate::{Result, Snapshot, SnapshotFile};
use drive_core::{seed, AppConfig, DriveStore, ItemId, Result as StoreResult, ViewMode};
use std::path::PathBuf;

/// A [`DriveStore`] bound to a snapshot file
///
/// Every durable mutation persists the store on success; persistence is
/// fire-and-forget, so a failed write is logged and the in-memory state stays
/// authoritative for the rest of the session. Navigation, selection and
/// search pass straight through without touching the file.
pub struct PersistentDrive {
    store: DriveStore,
    file: SnapshotFile,
}

impl PersistentDrive {
    /// Open the drive at a snapshot path, seeding the demo dataset when no
    /// snapshot exists yet
    pub fn open_at(config: &AppConfig, path: impl Into<PathBuf>) -> Result<Self> {
        let file = SnapshotFile::new(path);
        let capacity = config.storage.capacity_bytes;

        let store = match file.load()? {
            Some(snapshot) => DriveStore::with_items(
                snapshot.items,
                capacity,
                snapshot.view_mode,
                snapshot.dark_mode,
            ),
            None => {
                tracing::info!("no snapshot found, seeding demo dataset");
                DriveStore::with_items(
                    seed::demo_items(),
                    capacity,
                    config.general.default_view_mode,
                    false,
                )
            }
        };

        Ok(Self { store, file })
    }

    /// Discard any existing snapshot and start over from the seed dataset
    pub fn reset(config: &AppConfig, path: impl Into<PathBuf>) -> Result<Self> {
        let file = SnapshotFile::new(path);
        file.remove()?;

        let store = DriveStore::with_items(
            seed::demo_items(),
            config.storage.capacity_bytes,
            config.general.default_view_mode,
            false,
        );

        let drive = Self { store, file };
        drive.save()?;
        Ok(drive)
    }

    /// Read access to the underlying store
    pub fn store(&self) -> &DriveStore {
        &self.store
    }

    pub fn snapshot_path(&self) -> &std::path::Path {
        self.file.path()
    }

    /// Persist the current durable state
    pub fn save(&self) -> Result<()> {
        self.file.save(&Snapshot::capture(&self.store))
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::warn!("failed to persist snapshot: {}", e);
        }
    }

    // ===== Durable mutations (persisted on success) =====

    pub fn create_folder(&mut self, name: &str) -> StoreResult<ItemId> {
        let id = self.store.create_folder(name)?;
        self.persist();
        Ok(id)
    }

    pub fn add_file(&mut self, name: &str, size: u64) -> StoreResult<ItemId> {
        let id = self.store.add_file(name, size)?;
        self.persist();
        Ok(id)
    }

    pub fn rename_item(&mut self, id: &ItemId, new_name: &str) -> StoreResult<()> {
        self.store.rename_item(id, new_name)?;
        self.persist();
        Ok(())
    }

    pub fn move_item(&mut self, id: &ItemId, new_parent: Option<&ItemId>) -> StoreResult<()> {
        self.store.move_item(id, new_parent)?;
        self.persist();
        Ok(())
    }

    pub fn delete_item(&mut self, id: &ItemId) -> StoreResult<usize> {
        let removed = self.store.delete_item(id)?;
        self.persist();
        Ok(removed)
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.store.set_view_mode(mode);
        self.persist();
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        let on = self.store.toggle_dark_mode();
        self.persist();
        on
    }

    // ===== Session-only operations (never persisted) =====

    pub fn navigate_into(&mut self, folder: Option<&ItemId>) -> StoreResult<()> {
        self.store.navigate_into(folder)
    }

    pub fn navigate_up(&mut self) {
        self.store.navigate_up();
    }

    pub fn navigate_back(&mut self) -> bool {
        self.store.navigate_back()
    }

    pub fn toggle_selection(&mut self, id: ItemId) -> bool {
        self.store.toggle_selection(id)
    }

    pub fn clear_selection(&mut self) {
        self.store.clear_selection();
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.store.set_search_query(query);
    }

    pub fn show_context_menu(&mut self, x: i32, y: i32, item: Option<ItemId>) {
        self.store.show_context_menu(x, y, item);
    }

    pub fn hide_context_menu(&mut self) {
        self.store.hide_context_menu();
    }
}
