//! Field validation shared by items, categories and shopping-list entries.

/// Maximum length of any user-entered name, in characters.
pub const MAX_NAME_CHARS: usize = 50;

/// Validation error for submitted fridge data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty or only whitespace.
    EmptyName,
    /// Name is longer than [`MAX_NAME_CHARS`] characters.
    NameTooLong,
    /// Container type code outside 1..=3.
    InvalidContainerType,
    /// Quantity level code outside 1..=4.
    InvalidQuantityLevel,
    /// Category id is not a positive integer.
    InvalidCategory,
    /// A date field is not in `YYYY-MM-DD` form.
    InvalidDate {
        /// Form field holding the bad value.
        field: &'static str,
    },
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyName => "Name is required",
            Self::NameTooLong => "Name must be at most 50 characters",
            Self::InvalidContainerType => "Container type must be 1-3",
            Self::InvalidQuantityLevel => "Quantity level must be 1-4",
            Self::InvalidCategory => "Category must be a positive id",
            Self::InvalidDate { .. } => "Dates must use the YYYY-MM-DD format",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong => "name",
            Self::InvalidContainerType => "container_type",
            Self::InvalidQuantityLevel => "quantity_level",
            Self::InvalidCategory => "category_id",
            Self::InvalidDate { field } => *field,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Trim a submitted name and check it against the length rules.
///
/// Length is counted in characters so that multi-byte names such as
/// "醤油" count as two, not six.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyName`] or [`ValidationError::NameTooLong`].
pub fn normalize_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationError::NameTooLong);
    }
    Ok(trimmed.to_string())
}

/// Trim a submitted memo. Blank memos are stored as `NULL`.
#[must_use]
pub fn normalize_memo(memo: Option<&str>) -> Option<String> {
    memo.map(str::trim)
        .filter(|m| !m.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_name() {
        assert_eq!(normalize_name("  醤油 ").unwrap(), "醤油");
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(normalize_name(""), Err(ValidationError::EmptyName));
        assert_eq!(normalize_name("   "), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_length_counts_characters() {
        let fifty = "味".repeat(50);
        assert!(normalize_name(&fifty).is_ok());

        let fifty_one = "味".repeat(51);
        assert_eq!(normalize_name(&fifty_one), Err(ValidationError::NameTooLong));
    }

    #[test]
    fn test_blank_memo_is_none() {
        assert_eq!(normalize_memo(None), None);
        assert_eq!(normalize_memo(Some(" \t")), None);
        assert_eq!(normalize_memo(Some(" 開封済み ")).as_deref(), Some("開封済み"));
    }

    #[test]
    fn test_field_names() {
        assert_eq!(ValidationError::NameTooLong.field(), "name");
        assert_eq!(
            ValidationError::InvalidDate {
                field: "expiry_date"
            }
            .field(),
            "expiry_date"
        );
    }
}
