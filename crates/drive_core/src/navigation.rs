//! Navigation state - current folder and history stack

use crate::item::ItemId;

/// Navigation position within the item forest
///
/// `current = None` is the root and the initial state. The history stack
/// records positions left behind by forward navigation and feeds the single
/// `back` operation; moving up a level does not touch it, and there is no
/// redo stack.
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    current: Option<ItemId>,
    history: Vec<Option<ItemId>>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folder whose children are currently displayed (`None` = root)
    pub fn current(&self) -> Option<&ItemId> {
        self.current.as_ref()
    }

    pub fn at_root(&self) -> bool {
        self.current.is_none()
    }

    /// Enter a folder, pushing the old position onto the history stack
    pub fn enter(&mut self, folder: Option<ItemId>) {
        let old = std::mem::replace(&mut self.current, folder);
        self.history.push(old);
    }

    /// Move to a position without recording history (used for `up`)
    pub fn jump(&mut self, folder: Option<ItemId>) {
        self.current = folder;
    }

    /// Pop the history stack and restore the previous position.
    /// Returns false (and leaves the state alone) if history is empty.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(prev) => {
                self.current = prev;
                true
            }
            None => false,
        }
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_root() {
        let nav = NavigationState::new();
        assert!(nav.at_root());
        assert_eq!(nav.depth(), 0);
    }

    #[test]
    fn test_enter_pushes_history() {
        let mut nav = NavigationState::new();
        nav.enter(Some(ItemId::from("a")));
        nav.enter(Some(ItemId::from("b")));

        assert_eq!(nav.current(), Some(&ItemId::from("b")));
        assert_eq!(nav.depth(), 2);
    }

    #[test]
    fn test_back_restores_previous_position() {
        let mut nav = NavigationState::new();
        nav.enter(Some(ItemId::from("a")));
        nav.enter(Some(ItemId::from("b")));

        assert!(nav.back());
        assert_eq!(nav.current(), Some(&ItemId::from("a")));
        assert!(nav.back());
        assert!(nav.at_root());
        assert!(!nav.back());
        assert!(nav.at_root());
    }

    #[test]
    fn test_jump_leaves_history_alone() {
        let mut nav = NavigationState::new();
        nav.enter(Some(ItemId::from("a")));
        nav.jump(None);

        assert!(nav.at_root());
        assert_eq!(nav.depth(), 1);
        assert!(nav.back());
        assert!(nav.at_root());
    }
}
