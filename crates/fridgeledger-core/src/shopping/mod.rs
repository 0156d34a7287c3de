//! Shopping list.
//!
//! Entries are created from items that ran out or expired, or typed in by
//! hand. Once bought, an entry is either promoted back into an item or
//! purged together with the other checked entries.

mod model;
mod repository;

pub use model::{ShoppingDraft, ShoppingEntryId, ShoppingListEntry};
pub use repository::ShoppingListRepository;
