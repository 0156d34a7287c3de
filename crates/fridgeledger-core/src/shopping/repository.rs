//! Shopping list storage interface.

use async_trait::async_trait;

use super::model::{ShoppingDraft, ShoppingEntryId, ShoppingListEntry};
use crate::item::{Item, ItemDraft, ItemId};
use crate::{FridgeId, Result};

/// Storage operations for the shopping list.
#[async_trait]
pub trait ShoppingListRepository: Send + Sync {
    /// List a fridge's entries, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    async fn list_entries(&self, fridge_id: FridgeId) -> Result<Vec<ShoppingListEntry>>;

    /// Get an entry by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    async fn get_entry(&self, id: ShoppingEntryId) -> Result<Option<ShoppingListEntry>>;

    /// Copy an item's name, container type and memo onto the list.
    ///
    /// Returns `None` without writing anything if the item does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    async fn add_from_item(&self, item_id: ItemId) -> Result<Option<ShoppingListEntry>>;

    /// Validate and insert a hand-written entry.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad draft, or an error if the
    /// database query fails.
    async fn add_manual(
        &self,
        fridge_id: FridgeId,
        draft: &ShoppingDraft,
    ) -> Result<ShoppingListEntry>;

    /// Flip an entry's checked flag.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the entry does not exist, or an error if the
    /// database query fails.
    async fn toggle_checked(&self, id: ShoppingEntryId) -> Result<()>;

    /// Create an item from the draft and delete the entry, atomically.
    ///
    /// The new item belongs to the entry's fridge. Either both statements
    /// take effect or neither does.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad draft, `NotFound` if the entry
    /// does not exist, or an error if the database transaction fails.
    async fn promote_to_item(&self, id: ShoppingEntryId, draft: &ItemDraft) -> Result<Item>;

    /// Delete every checked entry of a fridge and return how many went.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    async fn purge_checked(&self, fridge_id: FridgeId) -> Result<u64>;
}
