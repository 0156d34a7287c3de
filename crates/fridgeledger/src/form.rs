//! Submitted HTML forms.
//!
//! Every field arrives as a string. Blank fields mean "not given": optional
//! values become `None` and the enum codes fall back to 1.

use chrono::NaiveDate;
use fridgeledger_core::{
    CategoryId, ContainerType, ItemDraft, QuantityLevel, ShoppingDraft, ValidationError,
};
use serde::Deserialize;

/// Date format used by `<input type="date">`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Register, edit and purchase forms.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ItemForm {
    /// Item name.
    pub name: String,
    /// Category id.
    pub category_id: String,
    /// Container type code.
    pub container_type: String,
    /// Quantity level code.
    pub quantity_level: String,
    /// `YYYY-MM-DD`.
    pub purchase_date: String,
    /// `YYYY-MM-DD`.
    pub opened_date: String,
    /// `YYYY-MM-DD`.
    pub expiry_date: String,
    /// Free-form note.
    pub memo: String,
}

impl ItemForm {
    /// Parse the submitted fields into a draft.
    ///
    /// Name and memo are passed through untouched; they are checked when
    /// the draft is stored.
    ///
    /// # Errors
    ///
    /// Returns the first malformed field.
    pub fn into_draft(self) -> Result<ItemDraft, ValidationError> {
        let category_id = match blank_to_none(&self.category_id) {
            Some(raw) => CategoryId::new(
                raw.parse()
                    .map_err(|_| ValidationError::InvalidCategory)?,
            ),
            None => CategoryId::DEFAULT,
        };

        Ok(ItemDraft {
            category_id,
            container_type: parse_container(&self.container_type)?,
            quantity_level: parse_quantity(&self.quantity_level)?,
            purchase_date: parse_date(&self.purchase_date, "purchase_date")?,
            opened_date: parse_date(&self.opened_date, "opened_date")?,
            expiry_date: parse_date(&self.expiry_date, "expiry_date")?,
            memo: Some(self.memo),
            name: self.name,
        })
    }
}

/// Manual shopping-list entry form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShoppingForm {
    /// Name of the thing to buy.
    pub item_name: String,
    /// Container type code.
    pub container_type: String,
    /// Free-form note.
    pub memo: String,
}

impl ShoppingForm {
    /// Parse the submitted fields into a draft.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidContainerType`] for a bad code.
    pub fn into_draft(self) -> Result<ShoppingDraft, ValidationError> {
        Ok(ShoppingDraft {
            container_type: parse_container(&self.container_type)?,
            item_name: self.item_name,
            memo: Some(self.memo),
        })
    }
}

/// New category form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CategoryForm {
    /// Category name.
    pub name: String,
}

fn blank_to_none(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn parse_code(raw: &str, invalid: ValidationError) -> Result<i64, ValidationError> {
    blank_to_none(raw).map_or(Ok(1), |raw| raw.parse().map_err(|_| invalid))
}

fn parse_container(raw: &str) -> Result<ContainerType, ValidationError> {
    ContainerType::from_code(parse_code(raw, ValidationError::InvalidContainerType)?)
}

fn parse_quantity(raw: &str) -> Result<QuantityLevel, ValidationError> {
    QuantityLevel::from_code(parse_code(raw, ValidationError::InvalidQuantityLevel)?)
}

fn parse_date(raw: &str, field: &'static str) -> Result<Option<NaiveDate>, ValidationError> {
    blank_to_none(raw)
        .map(|raw| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map_err(|_| ValidationError::InvalidDate { field })
        })
        .transpose()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_take_defaults() {
        let form = ItemForm {
            name: "醤油".to_string(),
            ..ItemForm::default()
        };
        let draft = form.into_draft().unwrap();
        assert_eq!(draft.category_id, CategoryId::DEFAULT);
        assert_eq!(draft.container_type, ContainerType::Liquid);
        assert_eq!(draft.quantity_level, QuantityLevel::Full);
        assert_eq!(draft.purchase_date, None);
        assert_eq!(draft.opened_date, None);
        assert_eq!(draft.expiry_date, None);
    }

    #[test]
    fn test_filled_form() {
        let form = ItemForm {
            name: "からし".to_string(),
            category_id: "2".to_string(),
            container_type: "2".to_string(),
            quantity_level: "3".to_string(),
            purchase_date: String::new(),
            opened_date: "2026-09-01".to_string(),
            expiry_date: "2026-12-31".to_string(),
            memo: "和からし".to_string(),
        };
        let draft = form.into_draft().unwrap();
        assert_eq!(draft.category_id, CategoryId(2));
        assert_eq!(draft.container_type, ContainerType::Tube);
        assert_eq!(draft.quantity_level, QuantityLevel::Low);
        assert_eq!(draft.opened_date, NaiveDate::from_ymd_opt(2026, 9, 1));
        assert_eq!(draft.expiry_date, NaiveDate::from_ymd_opt(2026, 12, 31));
        assert_eq!(draft.memo.as_deref(), Some("和からし"));
    }

    #[test]
    fn test_malformed_fields() {
        let form = ItemForm {
            quantity_level: "5".to_string(),
            ..ItemForm::default()
        };
        assert_eq!(
            form.into_draft(),
            Err(ValidationError::InvalidQuantityLevel)
        );

        let form = ItemForm {
            expiry_date: "12/31/2026".to_string(),
            ..ItemForm::default()
        };
        assert_eq!(
            form.into_draft(),
            Err(ValidationError::InvalidDate {
                field: "expiry_date"
            })
        );

        let form = ShoppingForm {
            container_type: "liquid".to_string(),
            ..ShoppingForm::default()
        };
        assert_eq!(
            form.into_draft(),
            Err(ValidationError::InvalidContainerType)
        );
    }
}
