//! Item storage interface.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{Item, ItemDraft, ItemId, QuantityLevel};
use super::sort::SortMode;
use crate::{CategoryId, FridgeId, Result};

/// Storage operations for items.
///
/// Implemented once per database backend in [`crate::store`].
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Fetch a fridge's items, optionally restricted to one category,
    /// ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    async fn fetch_items(
        &self,
        fridge_id: FridgeId,
        category_id: Option<CategoryId>,
    ) -> Result<Vec<Item>>;

    /// List a fridge's items in the order given by `sort`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    async fn list_by_fridge_and_category(
        &self,
        fridge_id: FridgeId,
        category_id: Option<CategoryId>,
        sort: SortMode,
        today: NaiveDate,
    ) -> Result<Vec<Item>> {
        let mut items = self.fetch_items(fridge_id, category_id).await?;
        sort.sort(&mut items, today);
        Ok(items)
    }

    /// Get an item by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    async fn get_item(&self, id: ItemId) -> Result<Option<Item>>;

    /// Validate and insert a new item.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad draft, or an error if the
    /// database query fails.
    async fn create_item(&self, fridge_id: FridgeId, draft: &ItemDraft) -> Result<Item>;

    /// Validate and overwrite an item's editable fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad draft, `NotFound` if the item
    /// does not exist, or an error if the database query fails.
    async fn update_item(&self, id: ItemId, draft: &ItemDraft) -> Result<Item>;

    /// Set an item's quantity level.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the item does not exist, or an error if the
    /// database query fails.
    async fn update_quantity_level(&self, id: ItemId, level: QuantityLevel) -> Result<()>;

    /// Delete an item.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the item does not exist, or an error if the
    /// database query fails.
    async fn delete_item(&self, id: ItemId) -> Result<()>;
}
