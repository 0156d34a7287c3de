//! `PostgreSQL` storage backend, used for hosted deployments.
//!
//! Mirrors [`super::SqliteStore`] statement for statement; only the
//! placeholder syntax, column types and id retrieval differ.

use async_trait::async_trait;
use sqlx::Postgres;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info, warn};

use super::rows::{CategoryRow, EntryRow, ItemRow, convert_all};
use crate::item::{Item, ItemDraft, ItemId, QuantityLevel, normalize_name};
use crate::shopping::{ShoppingDraft, ShoppingEntryId, ShoppingListEntry};
use crate::{
    Category, CategoryId, CategoryRepository, Error, FridgeId, ItemRepository, NotFound, Result,
    ShoppingListRepository,
};

/// Fridge storage in a `PostgreSQL` database.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect to the database at `url` and create the tables if they
    /// don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn new(url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    /// Initialize database schema.
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS categories (
                id BIGSERIAL PRIMARY KEY,
                fridge_id BIGINT NOT NULL,
                name TEXT NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS items (
                id BIGSERIAL PRIMARY KEY,
                fridge_id BIGINT NOT NULL,
                category_id BIGINT NOT NULL DEFAULT 1,
                name TEXT NOT NULL,
                container_type BIGINT NOT NULL DEFAULT 1,
                quantity_level BIGINT NOT NULL DEFAULT 1,
                purchase_date DATE,
                opened_date DATE,
                expiry_date DATE,
                memo TEXT,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_items_fridge_category
            ON items(fridge_id, category_id)
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS shopping_list (
                id BIGSERIAL PRIMARY KEY,
                fridge_id BIGINT NOT NULL,
                item_name TEXT NOT NULL,
                container_type BIGINT NOT NULL DEFAULT 1,
                memo TEXT,
                is_checked BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn require_item(&self, id: ItemId) -> Result<Item> {
        self.get_item(id)
            .await?
            .ok_or(Error::NotFound(NotFound::Item(id)))
    }

    async fn require_entry(&self, id: ShoppingEntryId) -> Result<ShoppingListEntry> {
        self.get_entry(id)
            .await?
            .ok_or(Error::NotFound(NotFound::ShoppingEntry(id)))
    }
}

async fn insert_item<'e, E>(executor: E, fridge_id: FridgeId, draft: &ItemDraft) -> Result<ItemId>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    let id: i64 = sqlx::query_scalar(
        r"
        INSERT INTO items (
            fridge_id, category_id, name, container_type, quantity_level,
            purchase_date, opened_date, expiry_date, memo
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id
        ",
    )
    .bind(fridge_id.0)
    .bind(draft.category_id.0)
    .bind(&draft.name)
    .bind(draft.container_type.code())
    .bind(draft.quantity_level.code())
    .bind(draft.purchase_date)
    .bind(draft.opened_date)
    .bind(draft.expiry_date)
    .bind(&draft.memo)
    .fetch_one(executor)
    .await?;

    Ok(ItemId::new(id))
}

#[async_trait]
impl ItemRepository for PostgresStore {
    async fn fetch_items(
        &self,
        fridge_id: FridgeId,
        category_id: Option<CategoryId>,
    ) -> Result<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r"
            SELECT id, fridge_id, category_id, name, container_type, quantity_level,
                   purchase_date, opened_date, expiry_date, memo, created_at
            FROM items
            WHERE fridge_id = $1 AND ($2::BIGINT IS NULL OR category_id = $2)
            ORDER BY id ASC
            ",
        )
        .bind(fridge_id.0)
        .bind(category_id.map(|c| c.0))
        .fetch_all(&self.pool)
        .await?;

        debug!("Fetched {} items for fridge {fridge_id}", rows.len());
        convert_all(rows)
    }

    async fn get_item(&self, id: ItemId) -> Result<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(
            r"
            SELECT id, fridge_id, category_id, name, container_type, quantity_level,
                   purchase_date, opened_date, expiry_date, memo, created_at
            FROM items
            WHERE id = $1
            ",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Item::try_from).transpose()
    }

    async fn create_item(&self, fridge_id: FridgeId, draft: &ItemDraft) -> Result<Item> {
        let draft = draft.validated()?;
        let id = insert_item(&self.pool, fridge_id, &draft).await?;
        info!("Created item {id} ({})", draft.name);
        self.require_item(id).await
    }

    async fn update_item(&self, id: ItemId, draft: &ItemDraft) -> Result<Item> {
        let draft = draft.validated()?;
        let result = sqlx::query(
            r"
            UPDATE items SET
                category_id = $1, name = $2, container_type = $3, quantity_level = $4,
                purchase_date = $5,
                opened_date = $6, expiry_date = $7, memo = $8
            WHERE id = $9
            ",
        )
        .bind(draft.category_id.0)
        .bind(&draft.name)
        .bind(draft.container_type.code())
        .bind(draft.quantity_level.code())
        .bind(draft.purchase_date)
        .bind(draft.opened_date)
        .bind(draft.expiry_date)
        .bind(&draft.memo)
        .bind(id.0)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(NotFound::Item(id)));
        }
        info!("Updated item {id}");
        self.require_item(id).await
    }

    async fn update_quantity_level(&self, id: ItemId, level: QuantityLevel) -> Result<()> {
        let result = sqlx::query("UPDATE items SET quantity_level = $1 WHERE id = $2")
            .bind(level.code())
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(NotFound::Item(id)));
        }
        info!("Item {id} quantity set to {}", level.code());
        Ok(())
    }

    async fn delete_item(&self, id: ItemId) -> Result<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(NotFound::Item(id)));
        }
        info!("Deleted item {id}");
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for PostgresStore {
    async fn list_categories(&self, fridge_id: FridgeId) -> Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT id, fridge_id, name, created_at
            FROM categories
            WHERE fridge_id = $1
            ORDER BY id ASC
            ",
        )
        .bind(fridge_id.0)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn create_category(&self, fridge_id: FridgeId, name: &str) -> Result<Category> {
        let name = normalize_name(name)?;
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            INSERT INTO categories (fridge_id, name) VALUES ($1, $2)
            RETURNING id, fridge_id, name, created_at
            ",
        )
        .bind(fridge_id.0)
        .bind(&name)
        .fetch_one(&self.pool)
        .await?;

        info!("Created category {} ({name})", row.id);
        Ok(row.into())
    }
}

#[async_trait]
impl ShoppingListRepository for PostgresStore {
    async fn list_entries(&self, fridge_id: FridgeId) -> Result<Vec<ShoppingListEntry>> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r"
            SELECT id, fridge_id, item_name, container_type, memo, is_checked, created_at
            FROM shopping_list
            WHERE fridge_id = $1
            ORDER BY created_at ASC, id ASC
            ",
        )
        .bind(fridge_id.0)
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    async fn get_entry(&self, id: ShoppingEntryId) -> Result<Option<ShoppingListEntry>> {
        let row = sqlx::query_as::<_, EntryRow>(
            r"
            SELECT id, fridge_id, item_name, container_type, memo, is_checked, created_at
            FROM shopping_list
            WHERE id = $1
            ",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ShoppingListEntry::try_from).transpose()
    }

    async fn add_from_item(&self, item_id: ItemId) -> Result<Option<ShoppingListEntry>> {
        let Some(item) = self.get_item(item_id).await? else {
            warn!("Item {item_id} not found, nothing added to the shopping list");
            return Ok(None);
        };

        let entry = self
            .add_manual(item.fridge_id, &ShoppingDraft::from_item(&item))
            .await?;
        Ok(Some(entry))
    }

    async fn add_manual(
        &self,
        fridge_id: FridgeId,
        draft: &ShoppingDraft,
    ) -> Result<ShoppingListEntry> {
        let draft = draft.validated()?;
        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO shopping_list (fridge_id, item_name, container_type, memo)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(fridge_id.0)
        .bind(&draft.item_name)
        .bind(draft.container_type.code())
        .bind(&draft.memo)
        .fetch_one(&self.pool)
        .await?;

        let id = ShoppingEntryId::new(id);
        info!("Added {} to the shopping list as entry {id}", draft.item_name);
        self.require_entry(id).await
    }

    async fn toggle_checked(&self, id: ShoppingEntryId) -> Result<()> {
        let result =
            sqlx::query("UPDATE shopping_list SET is_checked = NOT is_checked WHERE id = $1")
                .bind(id.0)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(NotFound::ShoppingEntry(id)));
        }
        debug!("Toggled shopping entry {id}");
        Ok(())
    }

    async fn promote_to_item(&self, id: ShoppingEntryId, draft: &ItemDraft) -> Result<Item> {
        let draft = draft.validated()?;

        let mut tx = self.pool.begin().await?;

        // Lock the entry so a concurrent promote of the same entry waits
        // and then sees it gone.
        let fridge_id: Option<i64> =
            sqlx::query_scalar("SELECT fridge_id FROM shopping_list WHERE id = $1 FOR UPDATE")
                .bind(id.0)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(fridge_id) = fridge_id else {
            return Err(Error::NotFound(NotFound::ShoppingEntry(id)));
        };

        let item_id = insert_item(&mut *tx, FridgeId(fridge_id), &draft).await?;

        sqlx::query("DELETE FROM shopping_list WHERE id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!("Promoted shopping entry {id} to item {item_id}");
        self.require_item(item_id).await
    }

    async fn purge_checked(&self, fridge_id: FridgeId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM shopping_list WHERE fridge_id = $1 AND is_checked")
            .bind(fridge_id.0)
            .execute(&self.pool)
            .await?;

        let purged = result.rows_affected();
        info!("Purged {purged} checked shopping entries for fridge {fridge_id}");
        Ok(purged)
    }
}
