//! Category storage interface.

use async_trait::async_trait;

use super::model::Category;
use crate::{FridgeId, Result};

/// Storage operations for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List a fridge's categories by id ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    async fn list_categories(&self, fridge_id: FridgeId) -> Result<Vec<Category>>;

    /// Validate the name and insert a new category.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad name, or an error if the
    /// database query fails.
    async fn create_category(&self, fridge_id: FridgeId, name: &str) -> Result<Category>;
}
