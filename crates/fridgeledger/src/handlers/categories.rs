//! Category handlers.

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;

use crate::AppState;
use crate::error::AppError;
use crate::form::CategoryForm;
use crate::notice::Notice;

/// `POST /add_category`
pub async fn add_category(
    State(state): State<AppState>,
    Form(form): Form<CategoryForm>,
) -> Result<Redirect, AppError> {
    state
        .service
        .add_category(&form.name)
        .await
        .map_err(AppError::back_to("/items"))?;
    Ok(Redirect::to(&Notice::CategoryAdded.attach("/items")))
}
