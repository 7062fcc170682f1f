//! Maps domain `AppError` to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};

use taskhub_core::error::{AppError, ErrorKind};

use crate::views;

/// Handler error wrapping [`AppError`] so it can become a response.
///
/// `?` on any `AppResult` converts into this type.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        match err.kind {
            // The message holds the path the user was trying to reach.
            ErrorKind::AuthenticationRequired => {
                Redirect::to(&views::login_url(Some(&err.message))).into_response()
            }
            ErrorKind::NotFound => {
                tracing::debug!(error = %err.message, "Not found");
                (StatusCode::NOT_FOUND, views::error::not_found_page()).into_response()
            }
            ErrorKind::Validation | ErrorKind::Authentication => (
                StatusCode::BAD_REQUEST,
                views::error::error_page("Neveljavna zahteva", &err.message),
            )
                .into_response(),
            ErrorKind::Conflict => (
                StatusCode::CONFLICT,
                views::error::error_page("Spor", &err.message),
            )
                .into_response(),
            _ => {
                tracing::error!(kind = %err.kind, error = %err.message, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    views::error::error_page(
                        "Napaka strežnika",
                        "Prišlo je do nepričakovane napake. Poskusite znova.",
                    ),
                )
                    .into_response()
            }
        }
    }
}
