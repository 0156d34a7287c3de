//! Fridge items: models, validation, status classification and ordering.
//!
//! An item is one condiment (or other stock) sitting in the fridge. Besides
//! plain storage, this module owns the two pieces of logic that shape the
//! list view:
//! - [`status`] decides how urgent an item looks (expired, expiring within a
//!   week, opened for a long time, empty)
//! - [`sort`] decides the order items are listed in

mod model;
mod repository;
pub mod sort;
pub mod status;
mod validation;

pub use model::{ContainerType, Item, ItemDraft, ItemId, QuantityLevel};
pub use repository::ItemRepository;
pub use sort::SortMode;
pub use status::{ExpiryStatus, ItemStatus, OpenedAge, OpenedSeverity};
pub use validation::{MAX_NAME_CHARS, ValidationError, normalize_memo, normalize_name};
