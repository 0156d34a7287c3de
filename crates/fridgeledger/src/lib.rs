//! # fridgeledger
//!
//! HTTP front end for the `FridgeLedger` refrigerator tracker: routing,
//! form parsing, redirect notices and server-rendered pages on top of
//! [`fridgeledger_core::FridgeService`].

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod error;
pub mod form;
pub mod handlers;
pub mod notice;
pub mod view;

use axum::Router;
use axum::routing::{get, post};
use chrono::NaiveDate;
use fridgeledger_core::FridgeService;
use tower_http::trace::TraceLayer;

use handlers::{categories, items, pages, shopping};

/// Shared request state.
#[derive(Clone)]
pub struct AppState {
    /// Fridge operations.
    pub service: FridgeService,
    clock: fn() -> NaiveDate,
}

impl AppState {
    /// State using the local calendar date.
    #[must_use]
    pub fn new(service: FridgeService) -> Self {
        Self {
            service,
            clock: local_today,
        }
    }

    /// Replace the date source, e.g. to pin "today" in tests.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    /// The date expiry and opened-age status is computed against.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::fridge_select))
        .route("/items", get(items::list_items))
        .route(
            "/update_quantity/{item_id}/{new_level}",
            post(items::update_quantity),
        )
        .route("/delete/{item_id}", post(items::delete_item))
        .route("/register", get(items::register_form).post(items::register))
        .route("/edit/{item_id}", get(items::edit_form).post(items::edit))
        .route("/share_settings", get(pages::share_settings))
        .route("/shopping_list", get(shopping::shopping_list))
        .route(
            "/add_to_shopping_list/{item_id}",
            post(shopping::add_to_shopping_list),
        )
        .route(
            "/toggle_shopping_check/{shopping_id}",
            post(shopping::toggle_shopping_check),
        )
        .route(
            "/purchase_from_list/{shopping_id}",
            get(shopping::purchase_form).post(shopping::purchase),
        )
        .route("/add_category", post(categories::add_category))
        .route(
            "/add_shopping_manual",
            get(shopping::add_manual_form).post(shopping::add_manual),
        )
        .route("/finish_shopping", post(shopping::finish_shopping))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
