//! Item categories.

mod model;
mod repository;

pub use model::{Category, CategoryId, DEFAULT_CATEGORY_NAME};
pub use repository::CategoryRepository;
