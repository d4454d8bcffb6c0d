//! NAS Drive Core Domain Logic
//!
//! This crate contains:
//! - The item model (files and folders as metadata records)
//! - The drive store (single source of truth for the item forest)
//! - Navigation state (current folder + history stack)
//! - Session state (selection, context menu)
//! - Configuration
//! - Error types
//! - The demo seed dataset

pub mod config;
pub mod error;
pub mod item;
pub mod navigation;
pub mod seed;
pub mod session;
pub mod store;

pub use config::{AppConfig, GeneralConfig, StorageConfig, ViewMode};
pub use error::{Result, StoreError};
pub use item::{Item, ItemId, ItemKind};
pub use navigation::NavigationState;
pub use session::{ContextMenuState, SelectionState};
pub use store::{filter_by_substring, DriveStore, StorageStats};
