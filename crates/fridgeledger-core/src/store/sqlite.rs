//! `SQLite` storage backend, used for local installations.

use async_trait::async_trait;
use sqlx::Sqlite;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::{debug, info, warn};

use super::rows::{CategoryRow, EntryRow, ItemRow, convert_all};
use crate::item::{Item, ItemDraft, ItemId, QuantityLevel, normalize_name};
use crate::shopping::{ShoppingDraft, ShoppingEntryId, ShoppingListEntry};
use crate::{
    Category, CategoryId, CategoryRepository, Error, FridgeId, ItemRepository, NotFound, Result,
    ShoppingListRepository,
};

/// Fridge storage in a local `SQLite` database file.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the database at the given path.
    ///
    /// Creates the tables if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn new(database_path: &str, max_connections: u32) -> Result<Self> {
        let url = format!("sqlite:{database_path}?mode=rwc");
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(&url)
            .await?;

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
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
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                fridge_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                fridge_id INTEGER NOT NULL,
                category_id INTEGER NOT NULL DEFAULT 1,
                name TEXT NOT NULL,
                container_type INTEGER NOT NULL DEFAULT 1,
                quantity_level INTEGER NOT NULL DEFAULT 1,
                purchase_date TEXT,
                opened_date TEXT,
                expiry_date TEXT,
                memo TEXT,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // Index for the per-fridge, per-category list view
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
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                fridge_id INTEGER NOT NULL,
                item_name TEXT NOT NULL,
                container_type INTEGER NOT NULL DEFAULT 1,
                memo TEXT,
                is_checked INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
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

/// Insert an already validated draft. Shared by plain creation and by the
/// promote transaction.
async fn insert_item<'e, E>(executor: E, fridge_id: FridgeId, draft: &ItemDraft) -> Result<ItemId>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r"
        INSERT INTO items (
            fridge_id, category_id, name, container_type, quantity_level,
            purchase_date, opened_date, expiry_date, memo
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
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
    .execute(executor)
    .await?;

    Ok(ItemId::new(result.last_insert_rowid()))
}

#[async_trait]
impl ItemRepository for SqliteStore {
    async fn fetch_items(
        &self,
        fridge_id: FridgeId,
        category_id: Option<CategoryId>,
    ) -> Result<Vec<Item>> {
        let category = category_id.map(|c| c.0);
        let rows = sqlx::query_as::<_, ItemRow>(
            r"
            SELECT id, fridge_id, category_id, name, container_type, quantity_level,
                   purchase_date, opened_date, expiry_date, memo, created_at
            FROM items
            WHERE fridge_id = ? AND (? IS NULL OR category_id = ?)
            ORDER BY id ASC
            ",
        )
        .bind(fridge_id.0)
        .bind(category)
        .bind(category)
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
            WHERE id = ?
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
                category_id = ?, name = ?, container_type = ?, quantity_level = ?,
                purchase_date = ?,
                opened_date = ?, expiry_date = ?, memo = ?
            WHERE id = ?
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
        let result = sqlx::query("UPDATE items SET quantity_level = ? WHERE id = ?")
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
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
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
impl CategoryRepository for SqliteStore {
    async fn list_categories(&self, fridge_id: FridgeId) -> Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT id, fridge_id, name, created_at
            FROM categories
            WHERE fridge_id = ?
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
        let result = sqlx::query("INSERT INTO categories (fridge_id, name) VALUES (?, ?)")
            .bind(fridge_id.0)
            .bind(&name)
            .execute(&self.pool)
            .await?;
        let id = result.last_insert_rowid();

        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, fridge_id, name, created_at FROM categories WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        info!("Created category {id} ({name})");
        Ok(row.into())
    }
}

#[async_trait]
impl ShoppingListRepository for SqliteStore {
    async fn list_entries(&self, fridge_id: FridgeId) -> Result<Vec<ShoppingListEntry>> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r"
            SELECT id, fridge_id, item_name, container_type, memo, is_checked, created_at
            FROM shopping_list
            WHERE fridge_id = ?
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
            WHERE id = ?
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
        let result = sqlx::query(
            r"
            INSERT INTO shopping_list (fridge_id, item_name, container_type, memo)
            VALUES (?, ?, ?, ?)
            ",
        )
        .bind(fridge_id.0)
        .bind(&draft.item_name)
        .bind(draft.container_type.code())
        .bind(&draft.memo)
        .execute(&self.pool)
        .await?;

        let id = ShoppingEntryId::new(result.last_insert_rowid());
        info!("Added {} to the shopping list as entry {id}", draft.item_name);
        self.require_entry(id).await
    }

    async fn toggle_checked(&self, id: ShoppingEntryId) -> Result<()> {
        let result = sqlx::query("UPDATE shopping_list SET is_checked = NOT is_checked WHERE id = ?")
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

        // Dropping `tx` without commit rolls both statements back.
        let mut tx = self.pool.begin().await?;

        let fridge_id: Option<i64> =
            sqlx::query_scalar("SELECT fridge_id FROM shopping_list WHERE id = ?")
                .bind(id.0)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(fridge_id) = fridge_id else {
            return Err(Error::NotFound(NotFound::ShoppingEntry(id)));
        };

        let item_id = insert_item(&mut *tx, FridgeId(fridge_id), &draft).await?;

        sqlx::query("DELETE FROM shopping_list WHERE id = ?")
            .bind(id.0)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!("Promoted shopping entry {id} to item {item_id}");
        self.require_item(item_id).await
    }

    async fn purge_checked(&self, fridge_id: FridgeId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM shopping_list WHERE fridge_id = ? AND is_checked = ?")
            .bind(fridge_id.0)
            .bind(true)
            .execute(&self.pool)
            .await?;

        let purged = result.rows_affected();
        info!("Purged {purged} checked shopping entries for fridge {fridge_id}");
        Ok(purged)
    }
}
