//! Item list ordering.
//!
//! Orderings are applied in-process after the rows are fetched, so they do
//! not depend on any SQL dialect's `CASE` or interval syntax.

use std::cmp::Ordering;

use chrono::NaiveDate;

use super::model::Item;
use super::status::warning_horizon;

/// How the item list is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    /// Expired first, then expiring within a week, then everything else.
    #[default]
    Expiry,
    /// Emptiest first.
    Quantity,
}

impl SortMode {
    /// Parse from the `sort` query parameter. Unknown values fall back to
    /// expiry-priority.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "quantity" => Self::Quantity,
            _ => Self::Expiry,
        }
    }

    /// Convert to the query parameter representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Expiry => "expiry",
            Self::Quantity => "quantity",
        }
    }

    /// Compare two items under this mode.
    #[must_use]
    pub fn compare(self, a: &Item, b: &Item, today: NaiveDate) -> Ordering {
        let primary = match self {
            Self::Quantity => b.quantity_level.cmp(&a.quantity_level),
            Self::Expiry => {
                expiry_bucket(a.expiry_date, today).cmp(&expiry_bucket(b.expiry_date, today))
            }
        };
        primary
            .then_with(|| ascending_nulls_last(a.expiry_date, b.expiry_date))
            .then_with(|| descending_nulls_last(a.purchase_date, b.purchase_date))
    }

    /// Sort items in place. The sort is stable, so remaining ties keep
    /// their fetch order.
    pub fn sort(self, items: &mut [Item], today: NaiveDate) {
        items.sort_by(|a, b| self.compare(a, b, today));
    }
}

/// Priority bucket for expiry-priority ordering.
///
/// - `0`: already expired
/// - `1`: expires between today and the warning horizon, inclusive
/// - `2`: expires later, or has no expiry date
#[must_use]
pub fn expiry_bucket(expiry_date: Option<NaiveDate>, today: NaiveDate) -> u8 {
    match expiry_date {
        Some(date) if date < today => 0,
        Some(date) if date <= warning_horizon(today) => 1,
        _ => 2,
    }
}

fn ascending_nulls_last(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn descending_nulls_last(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
