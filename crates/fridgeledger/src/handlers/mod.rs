//! Request handlers, one module per page group.

pub mod categories;
pub mod items;
pub mod pages;
pub mod shopping;
