//! Error types for the core library.

use thiserror::Error;

use crate::item::{ItemId, ValidationError};
use crate::shopping::ShoppingEntryId;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Submitted data failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error("{0}")]
    NotFound(NotFound),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be mapped onto a domain type.
    #[error("Corrupt row: {0}")]
    Corrupt(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Which record a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFound {
    /// No item with this id.
    Item(ItemId),
    /// No shopping-list entry with this id.
    ShoppingEntry(ShoppingEntryId),
}

impl std::fmt::Display for NotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Item(id) => write!(f, "Item not found: {id}"),
            Self::ShoppingEntry(id) => write!(f, "Shopping list entry not found: {id}"),
        }
    }
}

impl Error {
    /// Returns true if this error should be reported back to the user
    /// rather than treated as a server failure.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
