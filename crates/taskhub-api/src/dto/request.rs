//! Request DTOs with validation.

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use taskhub_service::form::FormErrors;
use taskhub_service::task::TaskInput;
use taskhub_service::user::validate_username as check_username;

const REQUIRED: &str = "To polje je obvezno.";

/// `?next=` on the login page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NextQuery {
    /// Where to go after logging in.
    pub next: Option<String>,
}

/// Login form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginForm {
    /// Username.
    #[validate(length(min = 1, message = "To polje je obvezno."))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "To polje je obvezno."))]
    pub password: String,
    /// Where to go after logging in.
    pub next: Option<String>,
}

/// Registration form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterForm {
    /// Username.
    #[validate(custom(function = "validate_username"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "To polje je obvezno."))]
    pub password: String,
    /// Password repeated.
    #[validate(length(min = 1, message = "To polje je obvezno."))]
    pub password_confirmation: String,
}

/// Password change form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PasswordChangeForm {
    /// Current password.
    pub current_password: String,
    /// New password.
    pub password: String,
    /// New password repeated.
    pub password_confirmation: String,
}

/// Task create/edit form.
///
/// There is no owner field: the owner always comes from the session.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TaskForm {
    /// Title.
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Present (with any value) when the checkbox is ticked.
    pub completed: Option<String>,
}

impl TaskForm {
    /// Normalized service input.
    pub fn to_input(&self) -> TaskInput {
        TaskInput::from_form(
            self.title.as_deref(),
            self.description.as_deref(),
            self.completed.is_some(),
        )
    }
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    check_username(username).map_err(|message| {
        ValidationError::new("invalid_username").with_message(message.into())
    })
}

/// Convert validator output into per-field form errors.
pub fn form_errors(errors: &ValidationErrors) -> FormErrors {
    let mut form = FormErrors::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| REQUIRED.to_string());
            form.add(field.to_string(), message);
        }
    }
    form
}
