//! Expiry and opened-age classification.
//!
//! Everything here is a pure function of the item's dates and "today", so
//! both storage backends share one set of date rules.

use chrono::{Days, NaiveDate};

use super::model::QuantityLevel;

/// Items expiring within this many days (inclusive) are flagged as a warning.
pub const EXPIRY_WARNING_DAYS: u64 = 7;

/// Opened for at least this many days: warning.
pub const OPENED_WARNING_DAYS: i64 = 30;

/// Opened for at least this many days: danger.
pub const OPENED_DANGER_DAYS: i64 = 90;

/// How close an item is to its best-before date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpiryStatus {
    /// Best-before date has passed.
    Expired,
    /// Expires within [`EXPIRY_WARNING_DAYS`].
    Warning,
    /// Expires later than that.
    Normal,
    /// No best-before date recorded.
    None,
}

impl ExpiryStatus {
    /// Machine-readable name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::Warning => "warning",
            Self::Normal => "normal",
            Self::None => "none",
        }
    }

    /// CSS class for the expiry column.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Expired => "text-danger",
            Self::Warning => "text-warning",
            Self::Normal | Self::None => "",
        }
    }

    /// Icon shown next to the expiry date.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Expired => "❌",
            Self::Warning => "⚠️",
            Self::Normal | Self::None => "",
        }
    }
}

/// How long an opened container has been open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OpenedSeverity {
    /// Less than [`OPENED_WARNING_DAYS`].
    Normal,
    /// Between [`OPENED_WARNING_DAYS`] and [`OPENED_DANGER_DAYS`].
    Warning,
    /// [`OPENED_DANGER_DAYS`] or more.
    Danger,
}

impl OpenedSeverity {
    /// Machine-readable name, also used as the CSS modifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// Days since opening, with its severity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenedAge {
    /// Whole days since the opened date, never negative.
    pub days: i64,
    /// Severity bucket for `days`.
    pub severity: OpenedSeverity,
}

/// Presentation metadata for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStatus {
    /// Expiry classification.
    pub expiry: ExpiryStatus,
    /// Opened age, if an opened date is recorded.
    pub opened: Option<OpenedAge>,
    /// Whether the item should be offered for the shopping list.
    pub show_add_to_list: bool,
}

/// Last day that still counts as "expiring soon" for `today`.
#[must_use]
pub fn warning_horizon(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(Days::new(EXPIRY_WARNING_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

/// Classify a best-before date relative to `today`.
#[must_use]
pub fn expiry_status(expiry_date: Option<NaiveDate>, today: NaiveDate) -> ExpiryStatus {
    match expiry_date {
        None => ExpiryStatus::None,
        Some(date) if date < today => ExpiryStatus::Expired,
        Some(date) if date <= warning_horizon(today) => ExpiryStatus::Warning,
        Some(_) => ExpiryStatus::Normal,
    }
}

/// Compute the opened age relative to `today`.
///
/// An opened date in the future counts as zero days.
#[must_use]
pub fn opened_age(opened_date: Option<NaiveDate>, today: NaiveDate) -> Option<OpenedAge> {
    let days = (today - opened_date?).num_days().max(0);
    let severity = if days >= OPENED_DANGER_DAYS {
        OpenedSeverity::Danger
    } else if days >= OPENED_WARNING_DAYS {
        OpenedSeverity::Warning
    } else {
        OpenedSeverity::Normal
    };
    Some(OpenedAge { days, severity })
}

/// Classify an item from its raw fields.
#[must_use]
pub fn classify(
    expiry_date: Option<NaiveDate>,
    opened_date: Option<NaiveDate>,
    quantity_level: QuantityLevel,
    today: NaiveDate,
) -> ItemStatus {
    let expiry = expiry_status(expiry_date, today);
    ItemStatus {
        expiry,
        opened: opened_age(opened_date, today),
        show_add_to_list: quantity_level.is_empty() || expiry == ExpiryStatus::Expired,
    }
}
