//! Shopping list handlers.

use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use fridgeledger_core::{ItemId, ShoppingEntryId};

use crate::AppState;
use crate::error::AppError;
use crate::form::{ItemForm, ShoppingForm};
use crate::notice::{Notice, NoticeQuery};
use crate::view;

/// `GET /shopping_list`
pub async fn shopping_list(
    State(state): State<AppState>,
    Query(notice): Query<NoticeQuery>,
) -> Result<Html<String>, AppError> {
    let entries = state.service.shopping_list().await?;
    Ok(Html(view::view_shopping_list(&entries, notice.notice())))
}

/// `POST /add_to_shopping_list/{item_id}`
///
/// A vanished item is not an error: the list is left alone and the user
/// lands back on the item list without a banner.
pub async fn add_to_shopping_list(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> Result<Redirect, AppError> {
    let added = state
        .service
        .add_to_shopping_list(ItemId::new(item_id))
        .await?;
    Ok(match added {
        Some(_) => Redirect::to(&Notice::AddedToList.attach("/items")),
        None => Redirect::to("/items"),
    })
}

/// `POST /toggle_shopping_check/{shopping_id}`
pub async fn toggle_shopping_check(
    State(state): State<AppState>,
    Path(shopping_id): Path<i64>,
) -> Result<Redirect, AppError> {
    state
        .service
        .toggle_shopping_check(ShoppingEntryId::new(shopping_id))
        .await?;
    Ok(Redirect::to(&Notice::ShoppingChecked.attach("/shopping_list")))
}

/// `GET /purchase_from_list/{shopping_id}`
pub async fn purchase_form(
    State(state): State<AppState>,
    Path(shopping_id): Path<i64>,
    Query(notice): Query<NoticeQuery>,
) -> Result<Html<String>, AppError> {
    let entry = state
        .service
        .shopping_entry(ShoppingEntryId::new(shopping_id))
        .await?;
    let categories = state.service.categories().await?;
    Ok(Html(view::view_purchase(
        &entry,
        &categories,
        notice.notice(),
    )))
}

/// `POST /purchase_from_list/{shopping_id}`
pub async fn purchase(
    State(state): State<AppState>,
    Path(shopping_id): Path<i64>,
    Form(form): Form<ItemForm>,
) -> Result<Redirect, AppError> {
    let back_to = format!("/purchase_from_list/{shopping_id}");
    let draft = form
        .into_draft()
        .map_err(|e| AppError::invalid(back_to.clone(), e))?;
    state
        .service
        .purchase_from_list(ShoppingEntryId::new(shopping_id), draft, state.today())
        .await
        .map_err(AppError::back_to(back_to))?;
    Ok(Redirect::to(&Notice::Purchased.attach("/items")))
}

/// `GET /add_shopping_manual`
pub async fn add_manual_form(Query(notice): Query<NoticeQuery>) -> Html<String> {
    Html(view::view_shopping_manual(notice.notice()))
}

/// `POST /add_shopping_manual`
pub async fn add_manual(
    State(state): State<AppState>,
    Form(form): Form<ShoppingForm>,
) -> Result<Redirect, AppError> {
    let draft = form
        .into_draft()
        .map_err(|e| AppError::invalid("/add_shopping_manual", e))?;
    state
        .service
        .add_shopping_manual(&draft)
        .await
        .map_err(AppError::back_to("/add_shopping_manual"))?;
    Ok(Redirect::to(&Notice::AddedToList.attach("/shopping_list")))
}

/// `POST /finish_shopping`
pub async fn finish_shopping(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let purged = state.service.finish_shopping().await?;
    Ok(Redirect::to(
        &Notice::ShoppingFinished(purged).attach("/shopping_list"),
    ))
}
