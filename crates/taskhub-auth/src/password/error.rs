//! Password policy failures.

use thiserror::Error;

use taskhub_core::config::UserAttribute;
use taskhub_core::error::{AppError, ErrorKind};

/// A single failed password check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    /// Fewer characters than the configured minimum.
    #[error("Geslo je prekratko. Imeti mora vsaj {min_length} znakov.")]
    TooShort {
        /// The configured minimum.
        min_length: usize,
    },
    /// Too close to one of the user's attributes.
    #[error("Geslo je preveč podobno uporabniškemu imenu.")]
    TooSimilar {
        /// The attribute the password resembles.
        attribute: UserAttribute,
    },
    /// Present in the common-password list.
    #[error("Prepogosto geslo.")]
    TooCommon,
    /// Made up only of digits.
    #[error("Geslo vsebuje samo števke.")]
    EntirelyNumeric,
}

impl PasswordError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TooShort { .. } => "password_too_short",
            Self::TooSimilar { .. } => "password_too_similar",
            Self::TooCommon => "password_too_common",
            Self::EntirelyNumeric => "password_entirely_numeric",
        }
    }

    /// Message followed by the name of the matching attribute, if any.
    pub fn detailed_message(&self) -> String {
        match self {
            Self::TooSimilar { attribute } => format!("{self} ({})", attribute.verbose_name()),
            _ => self.to_string(),
        }
    }
}

/// Every check that failed for one candidate password, in policy order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", messages(.errors))]
pub struct PasswordPolicyViolation {
    /// The individual failures. Never empty.
    pub errors: Vec<PasswordError>,
}

impl PasswordPolicyViolation {
    /// User-facing messages, one per failure.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Whether a failure with the given code is present.
    pub fn contains(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e.code() == code)
    }
}

fn messages(errors: &[PasswordError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl From<PasswordPolicyViolation> for AppError {
    fn from(violation: PasswordPolicyViolation) -> Self {
        AppError::with_source(ErrorKind::Validation, violation.to_string(), violation)
    }
}
