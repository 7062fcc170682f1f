//! Request handlers, grouped by page family.

pub mod auth;
pub mod health;
pub mod task;

use taskhub_core::error::AppError;
use taskhub_service::form::FormErrors;

use crate::error::ApiError;

/// Per-field errors carried by `err`, or `err` itself when it has none.
///
/// Form handlers re-render the page for the former and propagate the latter.
pub(crate) fn form_errors_or(err: AppError) -> Result<FormErrors, ApiError> {
    match err.source_as::<FormErrors>() {
        Some(errors) => Ok(errors.clone()),
        None => Err(err.into()),
    }
}
