//! Category model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::FridgeId;

/// Name of the category created for every new fridge.
pub const DEFAULT_CATEGORY_NAME: &str = "調味料";

/// Unique identifier for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub i64);

impl CategoryId {
    /// The seeded condiments category.
    pub const DEFAULT: Self = Self(1);

    /// Create a new category ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named group of items, e.g. condiments or drinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier.
    pub id: CategoryId,
    /// Fridge this category belongs to.
    pub fridge_id: FridgeId,
    /// Display name, 1-50 characters.
    pub name: String,
    /// When the row was created.
    pub created_at: NaiveDateTime,
}
