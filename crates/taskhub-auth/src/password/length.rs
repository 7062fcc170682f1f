//! Minimum length check.

use super::error::PasswordError;
use super::policy::PasswordValidator;
use super::subject::PasswordSubject;

/// Rejects passwords with fewer characters than a minimum.
#[derive(Debug, Clone)]
pub struct MinimumLengthValidator {
    min_length: usize,
}

impl MinimumLengthValidator {
    /// Creates the check with the given minimum.
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl PasswordValidator for MinimumLengthValidator {
    fn validate(
        &self,
        password: &str,
        _user: Option<&PasswordSubject<'_>>,
    ) -> Result<(), PasswordError> {
        if password.chars().count() < self.min_length {
            return Err(PasswordError::TooShort {
                min_length: self.min_length,
            });
        }
        Ok(())
    }

    fn help_text(&self) -> String {
        PasswordError::TooShort {
            min_length: self.min_length,
        }
        .to_string()
    }
}
