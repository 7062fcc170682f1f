//! Common-password list check.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use flate2::read::GzDecoder;
use tracing::{debug, info};

use taskhub_core::error::{AppError, ErrorKind};

use super::error::PasswordError;
use super::policy::PasswordValidator;
use super::subject::PasswordSubject;

/// Rejects passwords found in a list of commonly used passwords.
///
/// The list is loaded once and shared between clones.
#[derive(Debug, Clone)]
pub struct CommonPasswordValidator {
    passwords: Arc<HashSet<String>>,
}

impl CommonPasswordValidator {
    /// Load the list from a gzip-compressed or plain-text file with one
    /// password per line.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let contents = read_gzip(path).or_else(|e| {
            debug!(path = %path.display(), error = %e, "Password list is not gzip, reading as text");
            std::fs::read_to_string(path)
        });
        let contents = contents.map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Cannot read common password list '{}': {e}", path.display()),
                e,
            )
        })?;

        let validator = Self::from_lines(contents.lines());
        info!(
            path = %path.display(),
            count = validator.len(),
            "Common password list loaded"
        );
        Ok(validator)
    }

    /// Build the set from in-memory entries.
    ///
    /// Entries are trimmed and lower-cased here as well as the candidate
    /// in `validate`, so a mixed-case list entry still matches any casing
    /// of the candidate.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let passwords = lines
            .into_iter()
            .map(|line| line.as_ref().trim().to_lowercase())
            .filter(|line| !line.is_empty())
            .collect();
        Self {
            passwords: Arc::new(passwords),
        }
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.passwords.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.passwords.is_empty()
    }
}

fn read_gzip(path: &Path) -> std::io::Result<String> {
    let mut contents = String::new();
    GzDecoder::new(File::open(path)?).read_to_string(&mut contents)?;
    Ok(contents)
}

impl PasswordValidator for CommonPasswordValidator {
    fn validate(
        &self,
        password: &str,
        _user: Option<&PasswordSubject<'_>>,
    ) -> Result<(), PasswordError> {
        if self.passwords.contains(&password.trim().to_lowercase()) {
            return Err(PasswordError::TooCommon);
        }
        Ok(())
    }

    fn help_text(&self) -> String {
        "Geslo ne sme biti pogosto uporabljeno.".to_string()
    }
}
