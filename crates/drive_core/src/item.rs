//! Item model - files and folders as plain metadata records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque item identifier, immutable after creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Allocate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Item classification
///
/// `Folder` is structural; the rest are leaf classifications derived from the
/// file extension at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    #[serde(rename = "folder")]
    Folder,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "audio")]
    Audio,
    #[serde(rename = "document")]
    Document,
    #[serde(rename = "archive")]
    Archive,
    #[serde(rename = "code")]
    Code,
    #[serde(rename = "other")]
    Other,
}

const IMAGE_EXTS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "svg", "webp", "ico"];
const VIDEO_EXTS: &[&str] = &["mp4", "avi", "mkv", "mov", "wmv", "flv", "webm"];
const AUDIO_EXTS: &[&str] = &["mp3", "wav", "flac", "aac", "ogg", "wma", "m4a"];
const DOCUMENT_EXTS: &[&str] = &[
    "pdf", "doc", "docx", "txt", "rtf", "odt", "xls", "xlsx", "ppt", "pptx", "csv",
];
const ARCHIVE_EXTS: &[&str] = &["zip", "rar", "7z", "tar", "gz", "bz2"];
const CODE_EXTS: &[&str] = &[
    "js", "ts", "jsx", "tsx", "html", "css", "json", "xml", "py", "java", "cpp", "c", "h", "go",
    "rs", "php",
];

impl ItemKind {
    /// Classify a leaf item from its file name extension.
    /// Extensionless or unrecognized names classify as `Other`.
    pub fn classify(name: &str) -> ItemKind {
        let ext = match file_extension(name) {
            Some(e) => e,
            None => return ItemKind::Other,
        };

        if IMAGE_EXTS.contains(&ext.as_str()) {
            ItemKind::Image
        } else if VIDEO_EXTS.contains(&ext.as_str()) {
            ItemKind::Video
        } else if AUDIO_EXTS.contains(&ext.as_str()) {
            ItemKind::Audio
        } else if DOCUMENT_EXTS.contains(&ext.as_str()) {
            ItemKind::Document
        } else if ARCHIVE_EXTS.contains(&ext.as_str()) {
            ItemKind::Archive
        } else if CODE_EXTS.contains(&ext.as_str()) {
            ItemKind::Code
        } else {
            ItemKind::Other
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ItemKind::Folder => "folder",
            ItemKind::Image => "image",
            ItemKind::Video => "video",
            ItemKind::Audio => "audio",
            ItemKind::Document => "document",
            ItemKind::Archive => "archive",
            ItemKind::Code => "code",
            ItemKind::Other => "other",
        };
        f.write_str(label)
    }
}

/// Lowercased extension of a file name, if any
pub fn file_extension(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// A node in the item forest
///
/// `parent_id = None` means the item lives at the root. Folders always report
/// `size = 0`; a folder's size is never computed from its descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub size: u64,
    pub parent_id: Option<ItemId>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Item {
    /// Create a new folder with now-timestamps
    pub fn new_folder(name: impl Into<String>, parent_id: Option<ItemId>) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::generate(),
            name: name.into(),
            kind: ItemKind::Folder,
            size: 0,
            parent_id,
            created_at: now,
            modified_at: now,
        }
    }

    /// Create a new leaf item, classifying its kind from the name
    pub fn new_file(name: impl Into<String>, size: u64, parent_id: Option<ItemId>) -> Self {
        let name = name.into();
        let now = Utc::now();
        Self {
            id: ItemId::generate(),
            kind: ItemKind::classify(&name),
            name,
            size,
            parent_id,
            created_at: now,
            modified_at: now,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == ItemKind::Folder
    }

    /// Lowercased extension, if any
    pub fn extension(&self) -> Option<String> {
        file_extension(&self.name)
    }

    pub(crate) fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_extension() {
        assert_eq!(ItemKind::classify("photo.JPG"), ItemKind::Image);
        assert_eq!(ItemKind::classify("clip.mp4"), ItemKind::Video);
        assert_eq!(ItemKind::classify("song.flac"), ItemKind::Audio);
        assert_eq!(ItemKind::classify("report.docx"), ItemKind::Document);
        assert_eq!(ItemKind::classify("backup.tar"), ItemKind::Archive);
        assert_eq!(ItemKind::classify("main.rs"), ItemKind::Code);
        assert_eq!(ItemKind::classify("data.bin"), ItemKind::Other);
    }

    #[test]
    fn test_classify_extensionless() {
        assert_eq!(ItemKind::classify("README"), ItemKind::Other);
        assert_eq!(ItemKind::classify(".gitignore"), ItemKind::Other);
        assert_eq!(ItemKind::classify("trailing."), ItemKind::Other);
    }

    #[test]
    fn test_new_file_classifies() {
        let item = Item::new_file("notes.txt", 42, None);
        assert_eq!(item.kind, ItemKind::Document);
        assert_eq!(item.size, 42);
        assert_eq!(item.extension().as_deref(), Some("txt"));
        assert!(!item.is_folder());
    }

    #[test]
    fn test_new_folder_has_zero_size() {
        let parent = ItemId::from("p");
        let folder = Item::new_folder("Docs", Some(parent.clone()));
        assert!(folder.is_folder());
        assert_eq!(folder.size, 0);
        assert_eq!(folder.parent_id, Some(parent));
        assert_eq!(folder.created_at, folder.modified_at);
    }

    #[test]
    fn test_item_json_shape() {
        let item = Item {
            id: ItemId::from("file-1"),
            name: "README.txt".to_string(),
            kind: ItemKind::Document,
            size: 2048,
            parent_id: None,
            created_at: "2024-01-15T08:30:00Z".parse().unwrap(),
            modified_at: "2024-02-10T14:20:00Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "file-1");
        assert_eq!(json["type"], "document");
        assert_eq!(json["parentId"], serde_json::Value::Null);
        assert_eq!(json["createdAt"], "2024-01-15T08:30:00Z");

        let back: Item = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }
}
