//! Transient banners carried across redirects.
//!
//! A mutating request redirects with `?notice=<code>` (plus `count` where
//! the message needs a number) and the target page renders the banner.
//! Nothing is kept server-side.

use serde::Deserialize;

/// Banner severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// The action went through.
    Success,
    /// The action was rejected.
    Error,
}

impl NoticeLevel {
    /// CSS class of the banner.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "alert alert-success",
            Self::Error => "alert alert-error",
        }
    }
}

/// A notice to show after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Quantity level changed.
    QuantityUpdated,
    /// Quantity level outside 1-4.
    InvalidQuantity,
    /// New item stored.
    ItemRegistered,
    /// Item edited.
    ItemUpdated,
    /// Item removed.
    ItemDeleted,
    /// No such item.
    ItemNotFound,
    /// Name empty or too long.
    InvalidName,
    /// Some other field did not parse.
    InvalidForm,
    /// Entry added to the shopping list.
    AddedToList,
    /// Check mark of a shopping-list entry flipped.
    ShoppingChecked,
    /// No such shopping-list entry.
    EntryNotFound,
    /// Shopping-list entry turned into an item.
    Purchased,
    /// New category stored.
    CategoryAdded,
    /// Checked entries purged, with how many.
    ShoppingFinished(u64),
}

impl Notice {
    /// Code used in the query string.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::QuantityUpdated => "quantity_updated",
            Self::InvalidQuantity => "invalid_quantity",
            Self::ItemRegistered => "item_registered",
            Self::ItemUpdated => "item_updated",
            Self::ItemDeleted => "item_deleted",
            Self::ItemNotFound => "item_not_found",
            Self::InvalidName => "invalid_name",
            Self::InvalidForm => "invalid_form",
            Self::AddedToList => "added_to_list",
            Self::ShoppingChecked => "shopping_checked",
            Self::EntryNotFound => "entry_not_found",
            Self::Purchased => "purchased",
            Self::CategoryAdded => "category_added",
            Self::ShoppingFinished(_) => "shopping_finished",
        }
    }

    /// Parse a code back into a notice. Unknown codes yield `None`.
    #[must_use]
    pub fn parse(code: &str, count: Option<u64>) -> Option<Self> {
        let notice = match code {
            "quantity_updated" => Self::QuantityUpdated,
            "invalid_quantity" => Self::InvalidQuantity,
            "item_registered" => Self::ItemRegistered,
            "item_updated" => Self::ItemUpdated,
            "item_deleted" => Self::ItemDeleted,
            "item_not_found" => Self::ItemNotFound,
            "invalid_name" => Self::InvalidName,
            "invalid_form" => Self::InvalidForm,
            "added_to_list" => Self::AddedToList,
            "shopping_checked" => Self::ShoppingChecked,
            "entry_not_found" => Self::EntryNotFound,
            "purchased" => Self::Purchased,
            "category_added" => Self::CategoryAdded,
            "shopping_finished" => Self::ShoppingFinished(count.unwrap_or(0)),
            _ => return None,
        };
        Some(notice)
    }

    /// Banner severity.
    #[must_use]
    pub const fn level(self) -> NoticeLevel {
        match self {
            Self::InvalidQuantity
            | Self::ItemNotFound
            | Self::InvalidName
            | Self::InvalidForm
            | Self::EntryNotFound => NoticeLevel::Error,
            _ => NoticeLevel::Success,
        }
    }

    /// Banner text.
    #[must_use]
    pub fn message(self) -> String {
        match self {
            Self::QuantityUpdated => "残量を更新しました".to_string(),
            Self::InvalidQuantity => "無効な残量レベルです".to_string(),
            Self::ItemRegistered => "調味料を登録しました".to_string(),
            Self::ItemUpdated => "調味料を更新しました".to_string(),
            Self::ItemDeleted => "調味料を削除しました".to_string(),
            Self::ItemNotFound => "調味料が見つかりません".to_string(),
            Self::InvalidName => "調味料名は必須です(50文字以内)".to_string(),
            Self::InvalidForm => "入力内容に誤りがあります".to_string(),
            Self::AddedToList => "買い物リストに追加しました".to_string(),
            Self::ShoppingChecked => "チェックを更新しました".to_string(),
            Self::EntryNotFound => "買い物リストの項目が見つかりません".to_string(),
            Self::Purchased => "購入した調味料を登録しました".to_string(),
            Self::CategoryAdded => "カテゴリを追加しました".to_string(),
            Self::ShoppingFinished(count) => format!("{count}件の購入済みアイテムを削除しました"),
        }
    }

    /// Append this notice to `path` as query parameters.
    #[must_use]
    pub fn attach(self, path: &str) -> String {
        let separator = if path.contains('?') { '&' } else { '?' };
        match self {
            Self::ShoppingFinished(count) => {
                format!("{path}{separator}notice={}&count={count}", self.code())
            }
            _ => format!("{path}{separator}notice={}", self.code()),
        }
    }
}

/// The `notice`/`count` query parameters of a page.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    /// Notice code.
    pub notice: Option<String>,
    /// Number shown by notices that carry one.
    pub count: Option<u64>,
}

impl NoticeQuery {
    /// The notice to render, if any.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        Notice::parse(self.notice.as_deref()?, self.count)
    }
}
