//! Item model types.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::status::{self, ItemStatus};
use super::validation::{ValidationError, normalize_memo, normalize_name};
use crate::{CategoryId, FridgeId};

/// Unique identifier for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub i64);

impl ItemId {
    /// Create a new item ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Packaging class of a condiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContainerType {
    /// Bottles: soy sauce, vinegar, dressings.
    #[default]
    Liquid,
    /// Squeeze tubes: mustard, wasabi, mayonnaise.
    Tube,
    /// Shakers and bags: salt, pepper, spices.
    Powder,
}

impl ContainerType {
    /// All container types in code order.
    pub const ALL: [Self; 3] = [Self::Liquid, Self::Tube, Self::Powder];

    /// Parse from the stored/submitted integer code.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidContainerType`] for codes outside 1..=3.
    pub const fn from_code(code: i64) -> Result<Self, ValidationError> {
        match code {
            1 => Ok(Self::Liquid),
            2 => Ok(Self::Tube),
            3 => Ok(Self::Powder),
            _ => Err(ValidationError::InvalidContainerType),
        }
    }

    /// Convert to the stored integer code.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Liquid => 1,
            Self::Tube => 2,
            Self::Powder => 3,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Liquid => "液体",
            Self::Tube => "チューブ",
            Self::Powder => "粉末",
        }
    }
}

/// Coarse remaining-amount gauge.
///
/// Codes grow as the container empties, so sorting codes descending lists
/// the emptiest items first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum QuantityLevel {
    /// Full or nearly full.
    #[default]
    Full,
    /// About half left.
    Half,
    /// Running low.
    Low,
    /// Used up.
    Empty,
}

impl QuantityLevel {
    /// All levels in code order.
    pub const ALL: [Self; 4] = [Self::Full, Self::Half, Self::Low, Self::Empty];

    /// Parse from the stored/submitted integer code.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidQuantityLevel`] for codes outside 1..=4.
    pub const fn from_code(code: i64) -> Result<Self, ValidationError> {
        match code {
            1 => Ok(Self::Full),
            2 => Ok(Self::Half),
            3 => Ok(Self::Low),
            4 => Ok(Self::Empty),
            _ => Err(ValidationError::InvalidQuantityLevel),
        }
    }

    /// Convert to the stored integer code.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Full => 1,
            Self::Half => 2,
            Self::Low => 3,
            Self::Empty => 4,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Full => "満タン",
            Self::Half => "半分",
            Self::Low => "少ない",
            Self::Empty => "なし",
        }
    }

    /// Returns true if nothing is left.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// An item stored in a fridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier.
    pub id: ItemId,
    /// Fridge this item belongs to.
    pub fridge_id: FridgeId,
    /// Category this item is filed under.
    pub category_id: CategoryId,
    /// Display name, 1-50 characters.
    pub name: String,
    /// Packaging class.
    pub container_type: ContainerType,
    /// Remaining amount.
    pub quantity_level: QuantityLevel,
    /// Purchase date (legacy field, still used as a sort tie-break).
    pub purchase_date: Option<NaiveDate>,
    /// Date the container was opened.
    pub opened_date: Option<NaiveDate>,
    /// Best-before date.
    pub expiry_date: Option<NaiveDate>,
    /// Free-form note.
    pub memo: Option<String>,
    /// When the row was created.
    pub created_at: NaiveDateTime,
}

impl Item {
    /// Classify this item's expiry and opened-age status as of `today`.
    #[must_use]
    pub fn status(&self, today: NaiveDate) -> ItemStatus {
        status::classify(
            self.expiry_date,
            self.opened_date,
            self.quantity_level,
            today,
        )
    }

    /// Copy the mutable fields into a draft, e.g. to prefill an edit form.
    #[must_use]
    pub fn to_draft(&self) -> ItemDraft {
        ItemDraft {
            category_id: self.category_id,
            name: self.name.clone(),
            container_type: self.container_type,
            quantity_level: self.quantity_level,
            purchase_date: self.purchase_date,
            opened_date: self.opened_date,
            expiry_date: self.expiry_date,
            memo: self.memo.clone(),
        }
    }
}

/// The user-editable fields of an item, as submitted by the register,
/// edit and purchase forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    /// Category to file the item under.
    pub category_id: CategoryId,
    /// Display name.
    pub name: String,
    /// Packaging class.
    pub container_type: ContainerType,
    /// Remaining amount.
    pub quantity_level: QuantityLevel,
    /// Purchase date; on update `None` clears the stored value.
    pub purchase_date: Option<NaiveDate>,
    /// Date the container was opened.
    pub opened_date: Option<NaiveDate>,
    /// Best-before date.
    pub expiry_date: Option<NaiveDate>,
    /// Free-form note.
    pub memo: Option<String>,
}

impl ItemDraft {
    /// Create a draft with the given name and default values everywhere else.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            category_id: CategoryId::DEFAULT,
            name: name.into(),
            container_type: ContainerType::default(),
            quantity_level: QuantityLevel::default(),
            purchase_date: None,
            opened_date: None,
            expiry_date: None,
            memo: None,
        }
    }

    /// Validate the draft and return a copy with a normalized name and memo.
    ///
    /// Enum fields are valid by construction; only the name and category
    /// need checking here.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validated(&self) -> Result<Self, ValidationError> {
        if self.category_id.0 <= 0 {
            return Err(ValidationError::InvalidCategory);
        }
        Ok(Self {
            name: normalize_name(&self.name)?,
            memo: normalize_memo(self.memo.as_deref()),
            ..self.clone()
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_container_codes() {
        for container in ContainerType::ALL {
            assert_eq!(ContainerType::from_code(container.code()), Ok(container));
        }
        assert_eq!(
            ContainerType::from_code(0),
            Err(ValidationError::InvalidContainerType)
        );
        assert_eq!(
            ContainerType::from_code(4),
            Err(ValidationError::InvalidContainerType)
        );
    }

    #[test]
    fn test_quantity_codes() {
        assert_eq!(QuantityLevel::from_code(4), Ok(QuantityLevel::Empty));
        assert_eq!(
            QuantityLevel::from_code(5),
            Err(ValidationError::InvalidQuantityLevel)
        );
        assert_eq!(
            QuantityLevel::from_code(0),
            Err(ValidationError::InvalidQuantityLevel)
        );
        assert!(QuantityLevel::Empty.is_empty());
        assert!(!QuantityLevel::Low.is_empty());
    }

    #[test]
    fn test_labels() {
        assert_eq!(ContainerType::Tube.label(), "チューブ");
        assert_eq!(QuantityLevel::Half.label(), "半分");
    }

    #[test]
    fn test_validated_normalizes() {
        let mut draft = ItemDraft::new("  マヨネーズ ");
        draft.memo = Some("   ".to_string());

        let validated = draft.validated().unwrap();
        assert_eq!(validated.name, "マヨネーズ");
        assert_eq!(validated.memo, None);
    }

    #[test]
    fn test_validated_rejects_bad_category() {
        let mut draft = ItemDraft::new("Salt");
        draft.category_id = CategoryId(0);
        assert_eq!(draft.validated(), Err(ValidationError::InvalidCategory));
    }

    #[test]
    fn test_validated_rejects_long_name() {
        let draft = ItemDraft::new("x".repeat(51));
        assert_eq!(draft.validated(), Err(ValidationError::NameTooLong));
    }
}
