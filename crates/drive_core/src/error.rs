//! Store error types

use crate::item::ItemId;
use thiserror::Error;

/// Errors raised by store mutations
///
/// The store is purely in-memory, so nothing here is fatal. Callers are
/// expected to surface these inline (disable a submit, print a message) and
/// leave the item forest untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("item not found: {0}")]
    NotFound(ItemId),

    #[error("invalid move: {0}")]
    InvalidMove(String),

    #[error("invalid name: {0:?}")]
    InvalidName(String),
}

impl StoreError {
    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            StoreError::NotFound(id) => format!("No such item: {}", id),
            StoreError::InvalidMove(msg) => format!("Cannot move item: {}", msg),
            StoreError::InvalidName(name) => format!("Invalid name: {:?}", name),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
