//! Fridge identity.

use serde::{Deserialize, Serialize};

/// Identifier of the fridge that scopes items, categories and the shopping list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FridgeId(pub i64);

impl FridgeId {
    /// The single fridge every installation currently uses.
    pub const DEFAULT: Self = Self(1);

    /// Create a new fridge ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }
}

impl Default for FridgeId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for FridgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
