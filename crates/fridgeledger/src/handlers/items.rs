//! Item list, register, edit, quantity and delete handlers.

use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use fridgeledger_core::{CategoryId, ItemId, SortMode, ValidationError};
use serde::Deserialize;

use crate::AppState;
use crate::error::AppError;
use crate::form::ItemForm;
use crate::notice::{Notice, NoticeQuery};
use crate::view;

/// Query parameters of the item list.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Category id to filter by.
    pub category: Option<String>,
    /// `expiry` or `quantity`.
    pub sort: Option<String>,
}

impl ListQuery {
    /// The category filter. Anything but a positive id means "all".
    fn category(&self) -> Option<CategoryId> {
        self.category
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|id| *id > 0)
            .map(CategoryId::new)
    }

    fn sort(&self) -> SortMode {
        self.sort.as_deref().map(SortMode::parse).unwrap_or_default()
    }
}

/// `GET /items`
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    Query(notice): Query<NoticeQuery>,
) -> Result<Html<String>, AppError> {
    let sort = query.sort();
    let category = query.category();
    let items = state
        .service
        .list_items(category, sort, state.today())
        .await?;
    let categories = state.service.categories().await?;

    Ok(Html(view::view_items(
        &items,
        &categories,
        sort,
        category,
        notice.notice(),
    )))
}

/// `POST /update_quantity/{item_id}/{new_level}`
pub async fn update_quantity(
    State(state): State<AppState>,
    Path((item_id, new_level)): Path<(i64, String)>,
) -> Result<Redirect, AppError> {
    let new_level = new_level
        .trim()
        .parse()
        .map_err(|_| AppError::invalid("/items", ValidationError::InvalidQuantityLevel))?;
    state
        .service
        .update_quantity(ItemId::new(item_id), new_level)
        .await
        .map_err(AppError::back_to("/items"))?;
    Ok(Redirect::to(&Notice::QuantityUpdated.attach("/items")))
}

/// `POST /delete/{item_id}`
pub async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> Result<Redirect, AppError> {
    state.service.delete_item(ItemId::new(item_id)).await?;
    Ok(Redirect::to(&Notice::ItemDeleted.attach("/items")))
}

/// `GET /register`
pub async fn register_form(
    State(state): State<AppState>,
    Query(notice): Query<NoticeQuery>,
) -> Result<Html<String>, AppError> {
    let categories = state.service.categories().await?;
    Ok(Html(view::view_register(&categories, notice.notice())))
}

/// `POST /register`
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<ItemForm>,
) -> Result<Redirect, AppError> {
    let draft = form
        .into_draft()
        .map_err(|e| AppError::invalid("/register", e))?;
    state
        .service
        .register_item(draft, state.today())
        .await
        .map_err(AppError::back_to("/register"))?;
    Ok(Redirect::to(&Notice::ItemRegistered.attach("/items")))
}

/// `GET /edit/{item_id}`
pub async fn edit_form(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
    Query(notice): Query<NoticeQuery>,
) -> Result<Html<String>, AppError> {
    let item = state.service.item(ItemId::new(item_id)).await?;
    let categories = state.service.categories().await?;
    Ok(Html(view::view_edit(&item, &categories, notice.notice())))
}

/// `POST /edit/{item_id}`
pub async fn edit(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
    Form(form): Form<ItemForm>,
) -> Result<Redirect, AppError> {
    let back_to = format!("/edit/{item_id}");
    let draft = form
        .into_draft()
        .map_err(|e| AppError::invalid(back_to.clone(), e))?;
    state
        .service
        .edit_item(ItemId::new(item_id), &draft)
        .await
        .map_err(AppError::back_to(back_to))?;
    Ok(Redirect::to(&Notice::ItemUpdated.attach("/items")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_parsing() {
        let query = ListQuery {
            category: Some("2".to_string()),
            sort: Some("quantity".to_string()),
        };
        assert_eq!(query.category(), Some(CategoryId(2)));
        assert_eq!(query.sort(), SortMode::Quantity);

        let query = ListQuery {
            category: Some("abc".to_string()),
            sort: Some("bogus".to_string()),
        };
        assert_eq!(query.category(), None);
        assert_eq!(query.sort(), SortMode::Expiry);

        assert_eq!(ListQuery::default().sort(), SortMode::Expiry);
    }
}
