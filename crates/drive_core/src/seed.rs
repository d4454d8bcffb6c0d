//! Demo seed dataset used to populate a fresh store
//!
//! Stable readable ids and fixed timestamps so a first run always produces
//! the same drive.

use crate::item::{Item, ItemId, ItemKind};
use chrono::{DateTime, Utc};

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap_or_default()
}

fn folder(id: &str, name: &str, parent: Option<&str>, created: &str, modified: &str) -> Item {
    Item {
        id: ItemId::from(id),
        name: name.to_string(),
        kind: ItemKind::Folder,
        size: 0,
        parent_id: parent.map(ItemId::from),
        created_at: ts(created),
        modified_at: ts(modified),
    }
}

fn file(id: &str, name: &str, size: u64, parent: Option<&str>, created: &str, modified: &str) -> Item {
    Item {
        id: ItemId::from(id),
        name: name.to_string(),
        kind: ItemKind::classify(name),
        size,
        parent_id: parent.map(ItemId::from),
        created_at: ts(created),
        modified_at: ts(modified),
    }
}

/// Build the demo item forest
pub fn demo_items() -> Vec<Item> {
    vec![
        // Root folders
        folder("folder-1", "Documents", None, "2024-01-15T08:30:00Z", "2024-02-10T14:20:00Z"),
        folder("folder-2", "Images", None, "2024-01-16T09:15:00Z", "2024-02-12T11:45:00Z"),
        folder("folder-3", "Videos", None, "2024-01-17T10:00:00Z", "2024-02-08T16:30:00Z"),
        folder("folder-4", "Projects", None, "2024-01-18T11:30:00Z", "2024-02-15T09:00:00Z"),
        // Root files
        file("file-1", "README.txt", 2_048, None, "2024-01-15T08:35:00Z", "2024-02-14T10:15:00Z"),
        file("file-2", "todo-list.pdf", 154_320, None, "2024-01-20T13:45:00Z", "2024-02-10T15:30:00Z"),
        file("file-3", "backup.zip", 52_428_800, None, "2024-02-01T00:00:00Z", "2024-02-15T00:00:00Z"),
        // Documents
        folder("folder-1-1", "Work", Some("folder-1"), "2024-01-15T08:40:00Z", "2024-02-05T11:00:00Z"),
        folder("folder-1-2", "Personal", Some("folder-1"), "2024-01-15T08:45:00Z", "2024-02-12T09:20:00Z"),
        file("file-1-1", "report-2024.docx", 2_548_000, Some("folder-1"), "2024-01-20T09:00:00Z", "2024-02-14T16:45:00Z"),
        file("file-1-2", "budget-2024.xlsx", 452_000, Some("folder-1"), "2024-01-25T10:30:00Z", "2024-02-13T14:00:00Z"),
        file("file-1-3", "meeting-notes.pdf", 892_000, Some("folder-1"), "2024-02-01T15:00:00Z", "2024-02-01T15:00:00Z"),
        // Images
        folder("folder-2-1", "Vacation", Some("folder-2"), "2024-01-16T09:20:00Z", "2024-02-10T12:00:00Z"),
        folder("folder-2-2", "Screenshots", Some("folder-2"), "2024-01-16T09:25:00Z", "2024-02-14T10:30:00Z"),
        file("file-2-1", "profile-picture.jpg", 524_288, Some("folder-2"), "2024-01-16T09:30:00Z", "2024-01-16T09:30:00Z"),
        file("file-2-2", "banner.png", 1_048_576, Some("folder-2"), "2024-01-18T14:00:00Z", "2024-01-18T14:00:00Z"),
        file("file-2-3", "logo.svg", 16_384, Some("folder-2"), "2024-01-20T11:00:00Z", "2024-01-20T11:00:00Z"),
        file("file-2-4", "screenshot-001.png", 2_097_152, Some("folder-2-2"), "2024-02-14T10:30:00Z", "2024-02-14T10:30:00Z"),
        file("file-2-5", "screenshot-002.png", 1_835_008, Some("folder-2-2"), "2024-02-14T10:35:00Z", "2024-02-14T10:35:00Z"),
        // Videos
        folder("folder-3-1", "Tutorials", Some("folder-3"), "2024-01-17T10:15:00Z", "2024-02-08T16:00:00Z"),
        file("file-3-1", "intro-video.mp4", 134_217_728, Some("folder-3"), "2024-01-17T10:30:00Z", "2024-01-17T10:30:00Z"),
        file("file-3-2", "demo-screencast.mp4", 67_108_864, Some("folder-3"), "2024-02-01T14:00:00Z", "2024-02-01T14:00:00Z"),
        file("file-3-3", "tutorial-editing.mp4", 268_435_456, Some("folder-3-1"), "2024-02-08T16:00:00Z", "2024-02-08T16:00:00Z"),
        // Projects
        folder("folder-4-1", "nas-drive", Some("folder-4"), "2024-01-18T11:35:00Z", "2024-02-15T09:00:00Z"),
        folder("folder-4-2", "mobile-app", Some("folder-4"), "2024-01-25T09:00:00Z", "2024-02-10T14:30:00Z"),
        file("file-4-1", "index.html", 2_048, Some("folder-4-1"), "2024-01-18T11:40:00Z", "2024-02-15T09:00:00Z"),
        file("file-4-2", "main.rs", 4_096, Some("folder-4-1"), "2024-01-18T11:45:00Z", "2024-02-15T08:45:00Z"),
        file("file-4-3", "Cargo.toml", 1_024, Some("folder-4-1"), "2024-01-18T11:50:00Z", "2024-02-14T17:00:00Z"),
        file("file-4-4", "styles.css", 2_560, Some("folder-4-2"), "2024-01-25T09:20:00Z", "2024-02-08T11:00:00Z"),
        // Work
        file("file-1-1-1", "client-proposal.docx", 1_524_000, Some("folder-1-1"), "2024-02-05T11:00:00Z", "2024-02-05T11:00:00Z"),
        // Personal
        file("file-1-2-1", "letter.txt", 1_024, Some("folder-1-2"), "2024-02-12T09:20:00Z", "2024-02-12T09:20:00Z"),
        file("file-1-2-2", "contacts.csv", 5_120, Some("folder-1-2"), "2021-02-01T00:00:00Z", "2024-02-01T00:00:00Z"),
        // Vacation
        file("file-2-1-1", "beach-sunset.jpg", 3_145_728, Some("folder-2-1"), "2023-07-15T18:30:00Z", "2023-07-15T18:30:00Z"),
        file("file-2-1-2", "mountain-view.jpg", 2_621_440, Some("folder-2-1"), "2023-07-16T09:00:00Z", "2023-07-16T09:00:00Z"),
        file("file-2-1-3", "city-night.jpg", 1_835_008, Some("folder-2-1"), "2023-07-17T21:00:00Z", "2023-07-17T21:00:00Z"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewMode;
    use crate::store::DriveStore;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let items = demo_items();
        let ids: HashSet<&ItemId> = items.iter().map(|item| &item.id).collect();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn test_seed_parents_are_folders() {
        let items = demo_items();
        for item in &items {
            if let Some(parent) = &item.parent_id {
                let parent_item = items
                    .iter()
                    .find(|candidate| &candidate.id == parent)
                    .unwrap_or_else(|| panic!("dangling parent on {}", item.id));
                assert!(parent_item.is_folder());
            }
        }
    }

    #[test]
    fn test_seed_folders_have_zero_size() {
        for item in demo_items() {
            if item.is_folder() {
                assert_eq!(item.size, 0, "folder {} has a size", item.id);
            }
        }
    }

    #[test]
    fn test_seed_kinds_match_extensions() {
        let items = demo_items();
        let by_id = |id: &str| items.iter().find(|item| item.id == ItemId::from(id)).unwrap();

        assert_eq!(by_id("file-1").kind, ItemKind::Document);
        assert_eq!(by_id("file-3").kind, ItemKind::Archive);
        assert_eq!(by_id("file-2-2").kind, ItemKind::Image);
        assert_eq!(by_id("file-3-1").kind, ItemKind::Video);
        assert_eq!(by_id("file-4-2").kind, ItemKind::Code);
    }

    #[test]
    fn test_seed_loads_into_store() {
        let store = DriveStore::with_items(demo_items(), 1 << 40, ViewMode::Grid, false);
        assert_eq!(store.list_children(None).len(), 7);
        assert!(store.storage_stats().used > 0);
    }
}
