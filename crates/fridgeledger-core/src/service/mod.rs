//! Application services.
//!
//! The service layer sits between the HTTP handlers and the store: it
//! scopes every call to the configured fridge, fills in defaults that
//! depend on the current date and turns missing rows into errors.

mod fridge;

pub use fridge::{FridgeService, ListedItem};
