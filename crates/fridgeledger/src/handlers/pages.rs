//! Static pages.

use axum::response::Html;

use crate::view;

/// `GET /`
pub async fn fridge_select() -> Html<String> {
    Html(view::view_fridge_select())
}

/// `GET /share_settings`
pub async fn share_settings() -> Html<String> {
    Html(view::view_share_settings())
}
