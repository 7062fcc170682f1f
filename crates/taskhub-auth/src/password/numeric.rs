//! All-digit check.

use std::sync::LazyLock;

use regex::Regex;

use super::error::PasswordError;
use super::policy::PasswordValidator;
use super::subject::PasswordSubject;

// Unicode decimal digits (category Nd).
static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("static pattern is valid"));

/// Rejects passwords made up only of decimal digits.
///
/// Fractions and numeral letters such as `½` or `Ⅻ` are not digits.
#[derive(Debug, Clone, Default)]
pub struct NumericPasswordValidator;

impl PasswordValidator for NumericPasswordValidator {
    fn validate(
        &self,
        password: &str,
        _user: Option<&PasswordSubject<'_>>,
    ) -> Result<(), PasswordError> {
        if DIGITS.is_match(password) {
            return Err(PasswordError::EntirelyNumeric);
        }
        Ok(())
    }

    fn help_text(&self) -> String {
        "Geslo ne sme biti v celoti numerično.".to_string()
    }
}
