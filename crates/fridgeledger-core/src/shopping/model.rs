//! Shopping list models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::FridgeId;
use crate::item::{ContainerType, Item, ItemDraft, ValidationError, normalize_memo, normalize_name};

/// Unique identifier for a shopping-list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShoppingEntryId(pub i64);

impl ShoppingEntryId {
    /// Create a new entry ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ShoppingEntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Something to buy.
///
/// Entries keep no link to the item they were created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListEntry {
    /// Unique identifier.
    pub id: ShoppingEntryId,
    /// Fridge this entry belongs to.
    pub fridge_id: FridgeId,
    /// Name of the thing to buy.
    pub item_name: String,
    /// Packaging class.
    pub container_type: ContainerType,
    /// Free-form note.
    pub memo: Option<String>,
    /// Ticked off in the shop.
    pub is_checked: bool,
    /// When the row was created.
    pub created_at: NaiveDateTime,
}

impl ShoppingListEntry {
    /// Draft an item from this entry, e.g. to prefill the purchase form.
    #[must_use]
    pub fn to_item_draft(&self) -> ItemDraft {
        ItemDraft {
            container_type: self.container_type,
            memo: self.memo.clone(),
            ..ItemDraft::new(self.item_name.clone())
        }
    }
}

/// A shopping-list entry as submitted by the manual entry form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShoppingDraft {
    /// Name of the thing to buy.
    pub item_name: String,
    /// Packaging class.
    pub container_type: ContainerType,
    /// Free-form note.
    pub memo: Option<String>,
}

impl ShoppingDraft {
    /// Create a draft with the given name.
    #[must_use]
    pub fn new(item_name: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            ..Self::default()
        }
    }

    /// Copy name, container type and memo from an item.
    #[must_use]
    pub fn from_item(item: &Item) -> Self {
        Self {
            item_name: item.name.clone(),
            container_type: item.container_type,
            memo: item.memo.clone(),
        }
    }

    /// Validate the draft and return a copy with a normalized name and memo.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an empty or overlong name.
    pub fn validated(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            item_name: normalize_name(&self.item_name)?,
            container_type: self.container_type,
            memo: normalize_memo(self.memo.as_deref()),
        })
    }
}
