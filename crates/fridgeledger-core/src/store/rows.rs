//! Raw table rows and their conversion into domain types.
//!
//! Both backends decode into these structs, so the column-to-field mapping
//! and the code validation live in one place.

use chrono::{NaiveDate, NaiveDateTime};

use crate::item::{ContainerType, Item, ItemId, QuantityLevel, ValidationError};
use crate::shopping::{ShoppingEntryId, ShoppingListEntry};
use crate::{Category, CategoryId, Error, FridgeId, Result};

/// A row of the `items` table.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct ItemRow {
    pub id: i64,
    pub fridge_id: i64,
    pub category_id: i64,
    pub name: String,
    pub container_type: i64,
    pub quantity_level: i64,
    pub purchase_date: Option<NaiveDate>,
    pub opened_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub memo: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<ItemRow> for Item {
    type Error = Error;

    fn try_from(row: ItemRow) -> Result<Self> {
        Ok(Self {
            id: ItemId(row.id),
            fridge_id: FridgeId(row.fridge_id),
            category_id: CategoryId(row.category_id),
            container_type: ContainerType::from_code(row.container_type)
                .map_err(|e| corrupt("items", row.id, e))?,
            quantity_level: QuantityLevel::from_code(row.quantity_level)
                .map_err(|e| corrupt("items", row.id, e))?,
            name: row.name,
            purchase_date: row.purchase_date,
            opened_date: row.opened_date,
            expiry_date: row.expiry_date,
            memo: row.memo,
            created_at: row.created_at,
        })
    }
}

/// A row of the `categories` table.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct CategoryRow {
    pub id: i64,
    pub fridge_id: i64,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId(row.id),
            fridge_id: FridgeId(row.fridge_id),
            name: row.name,
            created_at: row.created_at,
        }
    }
}

/// A row of the `shopping_list` table.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct EntryRow {
    pub id: i64,
    pub fridge_id: i64,
    pub item_name: String,
    pub container_type: i64,
    pub memo: Option<String>,
    pub is_checked: bool,
    pub created_at: NaiveDateTime,
}

impl TryFrom<EntryRow> for ShoppingListEntry {
    type Error = Error;

    fn try_from(row: EntryRow) -> Result<Self> {
        Ok(Self {
            id: ShoppingEntryId(row.id),
            fridge_id: FridgeId(row.fridge_id),
            container_type: ContainerType::from_code(row.container_type)
                .map_err(|e| corrupt("shopping_list", row.id, e))?,
            item_name: row.item_name,
            memo: row.memo,
            is_checked: row.is_checked,
            created_at: row.created_at,
        })
    }
}

/// Convert a batch of rows, failing on the first bad one.
pub(super) fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = Error>,
{
    rows.into_iter().map(T::try_from).collect()
}

fn corrupt(table: &str, id: i64, error: ValidationError) -> Error {
    Error::Corrupt(format!("{table} row {id}: {}", error.message()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn created_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_item_row_maps_codes() {
        let row = ItemRow {
            id: 3,
            fridge_id: 1,
            category_id: 2,
            name: "わさび".to_string(),
            container_type: 2,
            quantity_level: 3,
            purchase_date: None,
            opened_date: NaiveDate::from_ymd_opt(2026, 9, 1),
            expiry_date: None,
            memo: Some("チューブ".to_string()),
            created_at: created_at(),
        };
        let item = Item::try_from(row).unwrap();
        assert_eq!(item.id, ItemId(3));
        assert_eq!(item.category_id, CategoryId(2));
        assert_eq!(item.container_type, ContainerType::Tube);
        assert_eq!(item.quantity_level, QuantityLevel::Low);
    }

    #[test]
    fn test_bad_code_is_corrupt() {
        let row = EntryRow {
            id: 9,
            fridge_id: 1,
            item_name: "塩".to_string(),
            container_type: 7,
            memo: None,
            is_checked: false,
            created_at: created_at(),
        };
        let err = ShoppingListEntry::try_from(row).unwrap_err();
        assert!(matches!(err, Error::Corrupt(msg) if msg.contains("shopping_list row 9")));
    }
}
