//! Transient session state - selection and context menu
//!
//! Nothing in this module survives a reload; only items, view mode and the
//! dark-mode flag are persisted.

use crate::item::ItemId;
use std::collections::HashSet;

/// Multi-select set over item ids
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: HashSet<ItemId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle membership of an id; returns true if it is now selected
    pub fn toggle(&mut self, id: ItemId) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.selected.contains(id)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drop ids that no longer exist (after a delete)
    pub fn retain_known(&mut self, known: &HashSet<ItemId>) {
        self.selected.retain(|id| known.contains(id));
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.selected.iter()
    }
}

/// Context menu state - position and the item it was invoked on
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextMenuState {
    pub visible: bool,
    pub x: i32,
    pub y: i32,
    pub item: Option<ItemId>,
}

impl ContextMenuState {
    pub fn show(&mut self, x: i32, y: i32, item: Option<ItemId>) {
        *self = Self {
            visible: true,
            x,
            y,
            item,
        };
    }

    pub fn hide(&mut self) {
        *self = Self::default();
    }
}
