//! Turning core errors into HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use fridgeledger_core::{Error, NotFound, ValidationError};

use crate::notice::Notice;

/// A failed request.
#[derive(Debug)]
pub enum AppError {
    /// Submitted data was rejected; go back to the form.
    Invalid {
        /// Form to return to.
        back_to: String,
        /// What was wrong.
        error: ValidationError,
    },
    /// The record is gone; go to its list view.
    Missing(NotFound),
    /// Storage or other server-side failure.
    Internal(Error),
}

impl AppError {
    /// A form field that failed to parse.
    pub fn invalid(path: impl Into<String>, error: ValidationError) -> Self {
        Self::Invalid {
            back_to: path.into(),
            error,
        }
    }

    /// Wrap a core error, returning to `back_to` on validation failures.
    pub fn back_to(path: impl Into<String>) -> impl FnOnce(Error) -> Self {
        let path = path.into();
        move |error| match error {
            Error::Validation(error) => Self::Invalid {
                back_to: path,
                error,
            },
            other => other.into(),
        }
    }
}

impl From<Error> for AppError {
    fn from(error: Error) -> Self {
        match error {
            Error::NotFound(missing) => Self::Missing(missing),
            other => Self::Internal(other),
        }
    }
}

/// Notice shown for a rejected submission.
pub(crate) const fn validation_notice(error: ValidationError) -> Notice {
    match error {
        ValidationError::EmptyName | ValidationError::NameTooLong => Notice::InvalidName,
        ValidationError::InvalidQuantityLevel => Notice::InvalidQuantity,
        ValidationError::InvalidContainerType
        | ValidationError::InvalidCategory
        | ValidationError::InvalidDate { .. } => Notice::InvalidForm,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Invalid { back_to, error } => {
                tracing::debug!("Rejected {}: {}", error.field(), error.message());
                Redirect::to(&validation_notice(error).attach(&back_to)).into_response()
            }
            Self::Missing(missing) => {
                tracing::warn!("{missing}");
                let target = match missing {
                    NotFound::Item(_) => Notice::ItemNotFound.attach("/items"),
                    NotFound::ShoppingEntry(_) => Notice::EntryNotFound.attach("/shopping_list"),
                };
                Redirect::to(&target).into_response()
            }
            Self::Internal(error) => {
                tracing::error!("Internal error: {error}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::header::LOCATION;
    use fridgeledger_core::{ItemId, ShoppingEntryId};

    use super::*;

    fn location(response: &Response) -> &str {
        response.headers()[LOCATION].to_str().unwrap()
    }

    #[test]
    fn test_validation_goes_back_to_form() {
        let error = AppError::back_to("/edit/3")(Error::Validation(ValidationError::EmptyName));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/edit/3?notice=invalid_name");
    }

    #[test]
    fn test_not_found_goes_to_list() {
        let response = AppError::from(Error::NotFound(NotFound::Item(ItemId(9)))).into_response();
        assert_eq!(location(&response), "/items?notice=item_not_found");

        let response =
            AppError::back_to("/purchase_from_list/4")(Error::NotFound(NotFound::ShoppingEntry(
                ShoppingEntryId(4),
            )))
            .into_response();
        assert_eq!(location(&response), "/shopping_list?notice=entry_not_found");
    }

    #[test]
    fn test_storage_failure_is_500() {
        let response = AppError::from(Error::Config("boom".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
