//! Fridge service.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::category::DEFAULT_CATEGORY_NAME;
use crate::{
    Category, CategoryId, Error, FridgeId, Item, ItemDraft, ItemId, ItemStatus, NotFound,
    QuantityLevel, Result, ShoppingDraft, ShoppingEntryId, ShoppingListEntry, SortMode, Store,
};

/// An item together with its status as of the listing date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedItem {
    /// The stored item.
    pub item: Item,
    /// Presentation metadata.
    pub status: ItemStatus,
}

/// Operations on one fridge.
#[derive(Clone)]
pub struct FridgeService {
    store: Arc<dyn Store>,
    fridge_id: FridgeId,
}

impl FridgeService {
    /// Create a service for `fridge_id` backed by `store`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, fridge_id: FridgeId) -> Self {
        Self { store, fridge_id }
    }

    /// The fridge this service operates on.
    #[must_use]
    pub const fn fridge_id(&self) -> FridgeId {
        self.fridge_id
    }

    /// Seed the default category if the fridge has none yet.
    ///
    /// New items are filed under category 1, so a fresh database needs it
    /// to exist before the first registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn bootstrap(&self) -> Result<()> {
        if self.store.list_categories(self.fridge_id).await?.is_empty() {
            let category = self
                .store
                .create_category(self.fridge_id, DEFAULT_CATEGORY_NAME)
                .await?;
            info!(
                "Seeded default category {} for fridge {}",
                category.id, self.fridge_id
            );
        }
        Ok(())
    }

    /// List items sorted by `sort`, each with its status as of `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_items(
        &self,
        category_id: Option<CategoryId>,
        sort: SortMode,
        today: NaiveDate,
    ) -> Result<Vec<ListedItem>> {
        let items = self
            .store
            .list_by_fridge_and_category(self.fridge_id, category_id, sort, today)
            .await?;
        debug!("Listing {} items sorted by {}", items.len(), sort.as_str());

        Ok(items
            .into_iter()
            .map(|item| ListedItem {
                status: item.status(today),
                item,
            })
            .collect())
    }

    /// Get an item.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the item does not exist, or an error if the
    /// database query fails.
    pub async fn item(&self, id: ItemId) -> Result<Item> {
        self.store
            .get_item(id)
            .await?
            .ok_or(Error::NotFound(NotFound::Item(id)))
    }

    /// Register a new item. A missing purchase date becomes `today`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad draft, or an error if the
    /// database query fails.
    pub async fn register_item(&self, mut draft: ItemDraft, today: NaiveDate) -> Result<Item> {
        draft.purchase_date.get_or_insert(today);
        self.store.create_item(self.fridge_id, &draft).await
    }

    /// Overwrite every mutable field of an item, including clearing the
    /// purchase date when the draft has none.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad draft, `NotFound` if the item
    /// does not exist, or an error if the database query fails.
    pub async fn edit_item(&self, id: ItemId, draft: &ItemDraft) -> Result<Item> {
        self.store.update_item(id, draft).await
    }

    /// Set an item's quantity level from a raw submitted code.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ValidationError::InvalidQuantityLevel`] for codes
    /// outside 1..=4 (nothing is written), `NotFound` if the item does not
    /// exist, or an error if the database query fails.
    pub async fn update_quantity(&self, id: ItemId, raw_level: i64) -> Result<QuantityLevel> {
        let level = QuantityLevel::from_code(raw_level)?;
        self.store.update_quantity_level(id, level).await?;
        Ok(level)
    }

    /// Delete an item.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the item does not exist, or an error if the
    /// database query fails.
    pub async fn delete_item(&self, id: ItemId) -> Result<()> {
        self.store.delete_item(id).await
    }

    /// List the fridge's categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.store.list_categories(self.fridge_id).await
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad name, or an error if the
    /// database query fails.
    pub async fn add_category(&self, name: &str) -> Result<Category> {
        self.store.create_category(self.fridge_id, name).await
    }

    /// List the shopping list, oldest entry first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn shopping_list(&self) -> Result<Vec<ShoppingListEntry>> {
        self.store.list_entries(self.fridge_id).await
    }

    /// Get a shopping-list entry.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the entry does not exist, or an error if the
    /// database query fails.
    pub async fn shopping_entry(&self, id: ShoppingEntryId) -> Result<ShoppingListEntry> {
        self.store
            .get_entry(id)
            .await?
            .ok_or(Error::NotFound(NotFound::ShoppingEntry(id)))
    }

    /// Put an item on the shopping list. Returns `None` if the item does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn add_to_shopping_list(&self, item_id: ItemId) -> Result<Option<ShoppingListEntry>> {
        self.store.add_from_item(item_id).await
    }

    /// Add a hand-written shopping-list entry.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad draft, or an error if the
    /// database query fails.
    pub async fn add_shopping_manual(&self, draft: &ShoppingDraft) -> Result<ShoppingListEntry> {
        self.store.add_manual(self.fridge_id, draft).await
    }

    /// Flip an entry's checked flag.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the entry does not exist, or an error if the
    /// database query fails.
    pub async fn toggle_shopping_check(&self, id: ShoppingEntryId) -> Result<()> {
        self.store.toggle_checked(id).await
    }

    /// Turn a bought entry into an item. A missing purchase date becomes
    /// `today`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad draft, `NotFound` if the entry
    /// does not exist, or an error if the database transaction fails.
    pub async fn purchase_from_list(
        &self,
        id: ShoppingEntryId,
        mut draft: ItemDraft,
        today: NaiveDate,
    ) -> Result<Item> {
        draft.purchase_date.get_or_insert(today);
        self.store.promote_to_item(id, &draft).await
    }

    /// Remove every checked entry and return how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn finish_shopping(&self) -> Result<u64> {
        self.store.purge_checked(self.fridge_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{ExpiryStatus, SqliteStore, ValidationError};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn service() -> FridgeService {
        let store = SqliteStore::in_memory().await.unwrap();
        let service = FridgeService::new(Arc::new(store), FridgeId::DEFAULT);
        service.bootstrap().await.unwrap();
        service
    }

    #[tokio::test]
    async fn test_bootstrap_seeds_default_category_once() {
        let service = service().await;
        service.bootstrap().await.unwrap();

        let categories = service.categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id, CategoryId::DEFAULT);
        assert_eq!(categories[0].name, DEFAULT_CATEGORY_NAME);
    }

    #[tokio::test]
    async fn test_register_defaults_purchase_date() {
        let service = service().await;
        let today = date(2026, 10, 19);

        let item = service
            .register_item(ItemDraft::new("みりん"), today)
            .await
            .unwrap();
        assert_eq!(item.purchase_date, Some(today));

        let explicit = ItemDraft {
            purchase_date: Some(date(2026, 10, 1)),
            ..ItemDraft::new("酢")
        };
        let item = service.register_item(explicit, today).await.unwrap();
        assert_eq!(item.purchase_date, Some(date(2026, 10, 1)));
    }

    #[tokio::test]
    async fn test_list_items_attaches_status() {
        let service = service().await;
        let today = date(2026, 10, 19);
        let expired = ItemDraft {
            expiry_date: Some(date(2026, 10, 18)),
            ..ItemDraft::new("マヨネーズ")
        };
        service.register_item(expired, today).await.unwrap();
        service
            .register_item(ItemDraft::new("塩"), today)
            .await
            .unwrap();

        let listed = service
            .list_items(None, SortMode::Expiry, today)
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].item.name, "マヨネーズ");
        assert_eq!(listed[0].status.expiry, ExpiryStatus::Expired);
        assert!(listed[0].status.show_add_to_list);
        assert_eq!(listed[1].status.expiry, ExpiryStatus::None);
        assert!(!listed[1].status.show_add_to_list);
    }

    #[tokio::test]
    async fn test_update_quantity_rejects_out_of_range() {
        let service = service().await;
        let item = service
            .register_item(ItemDraft::new("ソース"), date(2026, 10, 19))
            .await
            .unwrap();

        let err = service.update_quantity(item.id, 5).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidQuantityLevel)
        ));
        let stored = service.item(item.id).await.unwrap();
        assert_eq!(stored.quantity_level, QuantityLevel::Full);

        let level = service.update_quantity(item.id, 4).await.unwrap();
        assert_eq!(level, QuantityLevel::Empty);
        let stored = service.item(item.id).await.unwrap();
        assert_eq!(stored.quantity_level, QuantityLevel::Empty);
    }

    #[tokio::test]
    async fn test_missing_records_are_not_found() {
        let service = service().await;
        assert!(matches!(
            service.item(ItemId(42)).await,
            Err(Error::NotFound(NotFound::Item(ItemId(42))))
        ));
        assert!(matches!(
            service.shopping_entry(ShoppingEntryId(42)).await,
            Err(Error::NotFound(NotFound::ShoppingEntry(ShoppingEntryId(42))))
        ));
        assert!(
            service
                .add_to_shopping_list(ItemId(42))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_shopping_round_trip() {
        let service = service().await;
        let today = date(2026, 10, 19);

        let entry = service
            .add_shopping_manual(&ShoppingDraft::new("ごま油"))
            .await
            .unwrap();
        service
            .add_shopping_manual(&ShoppingDraft::new("胡椒"))
            .await
            .unwrap();
        service.toggle_shopping_check(entry.id).await.unwrap();

        let bought = service
            .purchase_from_list(entry.id, entry.to_item_draft(), today)
            .await
            .unwrap();
        assert_eq!(bought.name, "ごま油");
        assert_eq!(bought.purchase_date, Some(today));
        assert_eq!(bought.fridge_id, FridgeId::DEFAULT);

        let remaining = service.shopping_list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].item_name, "胡椒");

        service.toggle_shopping_check(remaining[0].id).await.unwrap();
        assert_eq!(service.finish_shopping().await.unwrap(), 1);
        assert!(service.shopping_list().await.unwrap().is_empty());
    }
}
