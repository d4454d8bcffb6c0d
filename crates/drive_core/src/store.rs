//! Drive store - single source of truth for the item forest
//!
//! Owns the full flat item collection plus the UI-adjacent state that hangs
//! off it: navigation position, selection, search query, view mode and the
//! dark-mode flag. All operations are synchronous and immediately consistent;
//! the only failures are the typed errors in [`crate::error`].

use crate::config::ViewMode;
use crate::error::{Result, StoreError};
use crate::item::{Item, ItemId};
use crate::navigation::NavigationState;
use crate::session::{ContextMenuState, SelectionState};
use std::collections::{HashMap, HashSet, VecDeque};

/// Aggregate byte accounting over all items
///
/// `available` is signed: nothing stops `used` from exceeding the fixed
/// ceiling, in which case it goes negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageStats {
    pub total: u64,
    pub used: u64,
    pub available: i64,
}

/// The item store
///
/// Items live in insertion order in `items`; `children` is an adjacency index
/// keyed by parent id so child listing and recursive deletes stay linear in
/// the subtree size. Each child list preserves the insertion order of the
/// backing collection.
pub struct DriveStore {
    items: Vec<Item>,
    children: HashMap<Option<ItemId>, Vec<ItemId>>,
    navigation: NavigationState,
    selection: SelectionState,
    context_menu: ContextMenuState,
    view_mode: ViewMode,
    dark_mode: bool,
    search_query: String,
    capacity: u64,
}

impl DriveStore {
    /// Create an empty store
    pub fn new(capacity: u64, view_mode: ViewMode) -> Self {
        Self::with_items(Vec::new(), capacity, view_mode, false)
    }

    /// Create a store from an existing item collection (seed or snapshot)
    pub fn with_items(items: Vec<Item>, capacity: u64, view_mode: ViewMode, dark_mode: bool) -> Self {
        let mut store = Self {
            items: Vec::new(),
            children: HashMap::new(),
            navigation: NavigationState::new(),
            selection: SelectionState::new(),
            context_menu: ContextMenuState::default(),
            view_mode,
            dark_mode,
            search_query: String::new(),
            capacity,
        };

        for item in items {
            store.add_item(item);
        }

        store
    }

    // ===== Queries =====

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items whose parent is `parent`, in insertion order
    pub fn list_children(&self, parent: Option<&ItemId>) -> Vec<&Item> {
        self.children
            .get(&parent.cloned())
            .map(|ids| ids.iter().filter_map(|id| self.get(id)).collect())
            .unwrap_or_default()
    }

    /// Direct children of the current folder
    pub fn current_items(&self) -> Vec<&Item> {
        self.list_children(self.navigation.current())
    }

    /// Root-to-leaf ancestor chain ending at `folder`
    ///
    /// A dangling parent reference terminates the walk silently, as does a
    /// parent cycle in a hand-edited snapshot.
    pub fn breadcrumb_path(&self, folder: &ItemId) -> Vec<&Item> {
        let mut path = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = Some(folder);

        while let Some(id) = cursor {
            if !seen.insert(id.clone()) {
                break;
            }
            match self.get(id) {
                Some(item) => {
                    path.push(item);
                    cursor = item.parent_id.as_ref();
                }
                None => break,
            }
        }

        path.reverse();
        path
    }

    /// Breadcrumbs for the current folder (empty at the root)
    pub fn current_path(&self) -> Vec<&Item> {
        match self.navigation.current() {
            Some(id) => self.breadcrumb_path(id),
            None => Vec::new(),
        }
    }

    /// Ids of every item transitively reachable from `id` via parent links
    pub fn descendant_ids(&self, id: &ItemId) -> HashSet<ItemId> {
        let mut found = HashSet::new();
        let mut queue = VecDeque::from([id.clone()]);

        while let Some(next) = queue.pop_front() {
            if let Some(child_ids) = self.children.get(&Some(next)) {
                for child in child_ids {
                    if found.insert(child.clone()) {
                        queue.push_back(child.clone());
                    }
                }
            }
        }

        found
    }

    pub fn storage_stats(&self) -> StorageStats {
        let used: u64 = self.items.iter().map(|item| item.size).sum();
        StorageStats {
            total: self.capacity,
            used,
            available: self.capacity as i64 - used as i64,
        }
    }

    // ===== Navigation =====

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn current_folder(&self) -> Option<&ItemId> {
        self.navigation.current()
    }

    /// Enter a folder (`None` = root), recording the old position in history.
    /// Clears the search query and the selection.
    pub fn navigate_into(&mut self, folder: Option<&ItemId>) -> Result<()> {
        if let Some(id) = folder {
            let item = self.get(id).ok_or_else(|| StoreError::NotFound(id.clone()))?;
            if !item.is_folder() {
                return Err(StoreError::InvalidMove(format!(
                    "{:?} is not a folder",
                    item.name
                )));
            }
        }

        self.navigation.enter(folder.cloned());
        self.search_query.clear();
        self.selection.clear();
        tracing::debug!(folder = ?folder, "navigated into folder");
        Ok(())
    }

    /// Move one level toward the root; a no-op at the root. History untouched.
    pub fn navigate_up(&mut self) {
        let Some(current) = self.navigation.current().cloned() else {
            return;
        };

        // A stale current folder (deleted underneath us) resolves to the root.
        let parent = self.get(&current).and_then(|item| item.parent_id.clone());
        self.navigation.jump(parent);
        self.selection.clear();
    }

    /// Single-step undo of forward navigation
    pub fn navigate_back(&mut self) -> bool {
        let moved = self.navigation.back();
        if moved {
            self.selection.clear();
        }
        moved
    }

    // ===== Mutations =====

    /// Append an existing item record to the collection
    pub fn add_item(&mut self, item: Item) {
        self.children
            .entry(item.parent_id.clone())
            .or_default()
            .push(item.id.clone());
        self.items.push(item);
    }

    /// Create a folder inside the current folder
    pub fn create_folder(&mut self, name: &str) -> Result<ItemId> {
        let name = validate_name(name)?;
        let item = Item::new_folder(name, self.navigation.current().cloned());
        let id = item.id.clone();
        self.add_item(item);
        tracing::debug!(%id, "created folder");
        Ok(id)
    }

    /// Create a leaf item inside the current folder, classifying its kind
    /// from the name's extension
    pub fn add_file(&mut self, name: &str, size: u64) -> Result<ItemId> {
        let name = validate_name(name)?;
        let item = Item::new_file(name, size, self.navigation.current().cloned());
        let id = item.id.clone();
        self.add_item(item);
        tracing::debug!(%id, size, "added file");
        Ok(id)
    }

    /// Rename an item and bump its modified timestamp
    pub fn rename_item(&mut self, id: &ItemId, new_name: &str) -> Result<()> {
        let name = validate_name(new_name)?;
        let item = self
            .items
            .iter_mut()
            .find(|item| &item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        item.name = name;
        item.touch();
        Ok(())
    }

    /// Reparent an item and bump its modified timestamp
    ///
    /// Rejects destinations that would corrupt the forest: the item itself,
    /// a non-folder, or anything inside the item's own subtree.
    pub fn move_item(&mut self, id: &ItemId, new_parent: Option<&ItemId>) -> Result<()> {
        if self.get(id).is_none() {
            return Err(StoreError::NotFound(id.clone()));
        }

        if let Some(dest) = new_parent {
            if dest == id {
                return Err(StoreError::InvalidMove(
                    "destination is the item itself".to_string(),
                ));
            }
            let dest_item = self
                .get(dest)
                .ok_or_else(|| StoreError::NotFound(dest.clone()))?;
            if !dest_item.is_folder() {
                return Err(StoreError::InvalidMove(format!(
                    "{:?} is not a folder",
                    dest_item.name
                )));
            }
            if self.descendant_ids(id).contains(dest) {
                return Err(StoreError::InvalidMove(
                    "destination is inside the moved folder".to_string(),
                ));
            }
        }

        let old_parent = self
            .get(id)
            .and_then(|item| item.parent_id.clone());

        if let Some(siblings) = self.children.get_mut(&old_parent) {
            siblings.retain(|child| child != id);
        }
        self.children
            .entry(new_parent.cloned())
            .or_default()
            .push(id.clone());

        if let Some(item) = self.items.iter_mut().find(|item| &item.id == id) {
            item.parent_id = new_parent.cloned();
            item.touch();
        }

        tracing::debug!(%id, dest = ?new_parent, "moved item");
        Ok(())
    }

    /// Delete an item; a folder takes its whole subtree with it.
    /// Returns the number of items removed.
    pub fn delete_item(&mut self, id: &ItemId) -> Result<usize> {
        let parent_key = match self.get(id) {
            Some(item) => item.parent_id.clone(),
            None => return Err(StoreError::NotFound(id.clone())),
        };

        let mut doomed = self.descendant_ids(id);
        doomed.insert(id.clone());

        self.items.retain(|item| !doomed.contains(&item.id));

        if let Some(siblings) = self.children.get_mut(&parent_key) {
            siblings.retain(|child| child != id);
        }
        for gone in &doomed {
            self.children.remove(&Some(gone.clone()));
        }

        let known: HashSet<ItemId> = self.items.iter().map(|item| item.id.clone()).collect();
        self.selection.retain_known(&known);
        if self
            .context_menu
            .item
            .as_ref()
            .is_some_and(|target| doomed.contains(target))
        {
            self.context_menu.hide();
        }

        tracing::debug!(%id, removed = doomed.len(), "deleted item");
        Ok(doomed.len())
    }

    // ===== Selection & context menu =====

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Toggle membership of an id; returns true if it is now selected
    pub fn toggle_selection(&mut self, id: ItemId) -> bool {
        self.selection.toggle(id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn context_menu(&self) -> &ContextMenuState {
        &self.context_menu
    }

    pub fn show_context_menu(&mut self, x: i32, y: i32, item: Option<ItemId>) {
        self.context_menu.show(x, y, item);
    }

    pub fn hide_context_menu(&mut self) {
        self.context_menu.hide();
    }

    // ===== Search & presentation =====

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Current folder's direct children matching the active search query.
    /// Not a recursive search.
    pub fn search_children(&self) -> Vec<&Item> {
        let children = self.current_items();
        filter_by_substring(&children, &self.search_query)
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Flip the dark-mode flag; returns the new value
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }
}

/// Case-insensitive substring match on item names
pub fn filter_by_substring<'a>(items: &[&'a Item], query: &str) -> Vec<&'a Item> {
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .copied()
        .collect()
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(trimmed.to_string())
}
