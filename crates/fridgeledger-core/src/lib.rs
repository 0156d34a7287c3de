//! # fridgeledger-core
//!
//! Core business logic for the `FridgeLedger` refrigerator tracker.
//!
//! This crate provides:
//! - Item, category and shopping-list domain models
//! - **Status classification** - expiry and opened-age presentation metadata
//! - **Sort policy** - expiry-priority and quantity-priority listings
//! - Repository traits with `SQLite` and `PostgreSQL` storage backends
//! - The fridge service orchestrating all of the above
//! - Startup configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod category;
pub mod config;
mod error;
mod fridge;
pub mod item;
pub mod service;
pub mod shopping;
pub mod store;

pub use category::{Category, CategoryId, CategoryRepository};
pub use config::{Config, DatabaseBackend};
pub use error::{Error, NotFound, Result};
pub use fridge::FridgeId;
pub use item::{
    ContainerType, ExpiryStatus, Item, ItemDraft, ItemId, ItemRepository, ItemStatus,
    MAX_NAME_CHARS, OpenedAge, OpenedSeverity, QuantityLevel, SortMode, ValidationError,
};
pub use service::{FridgeService, ListedItem};
pub use shopping::{ShoppingDraft, ShoppingEntryId, ShoppingListEntry, ShoppingListRepository};
pub use store::{PostgresStore, SqliteStore, Store, connect};
