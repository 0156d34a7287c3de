//! Database backends.
//!
//! Local installations keep their data in a `SQLite` file, hosted ones in
//! `PostgreSQL`. Both implement every repository trait, so the rest of the
//! application only ever sees a [`Store`].

mod postgres;
mod rows;
mod sqlite;

use std::sync::Arc;

use tracing::info;

pub use postgres::PostgresStore;
pub use sqlite::SqliteStore;

use crate::{
    CategoryRepository, DatabaseBackend, Error, ItemRepository, Result, ShoppingListRepository,
};

/// A complete fridge store: items, categories and the shopping list.
pub trait Store: ItemRepository + CategoryRepository + ShoppingListRepository {}

impl<T> Store for T where T: ItemRepository + CategoryRepository + ShoppingListRepository {}

/// Open the configured backend.
///
/// For `SQLite` the parent directory of the database file is created first.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, the path is not
/// valid UTF-8, or the database connection or schema creation fails.
pub async fn connect(backend: &DatabaseBackend, max_connections: u32) -> Result<Arc<dyn Store>> {
    match backend {
        DatabaseBackend::Sqlite { path } => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let path_str = path.to_str().ok_or_else(|| {
                Error::Config(format!("database path is not valid UTF-8: {}", path.display()))
            })?;
            info!("Opening SQLite database at {}", path.display());
            Ok(Arc::new(SqliteStore::new(path_str, max_connections).await?))
        }
        DatabaseBackend::Postgres { url } => {
            info!("Connecting to PostgreSQL");
            Ok(Arc::new(PostgresStore::new(url, max_connections).await?))
        }
    }
}
