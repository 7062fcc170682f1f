//! Per-field validation failures for HTML forms.

use std::collections::BTreeMap;

use thiserror::Error;

use taskhub_core::error::{AppError, ErrorKind};

/// Messages keyed by form field name.
///
/// Travels as the source of a `Validation` [`AppError`] so the HTTP
/// layer can re-render the form with each message next to its field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", join_messages(.fields))]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    /// No errors yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Record several messages for `field`.
    pub fn extend<I, S>(&mut self, field: &str, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for message in messages {
            self.add(field, message);
        }
    }

    /// Messages for one field.
    pub fn field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every message, ordered by field name.
    pub fn messages(&self) -> Vec<&str> {
        self.fields.values().flatten().map(String::as_str).collect()
    }

    /// Fields with their messages, ordered by field name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `Ok(())` when empty, otherwise a `Validation` error carrying `self`.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into())
        }
    }
}

fn join_messages(fields: &BTreeMap<String, Vec<String>>) -> String {
    fields
        .values()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

impl From<FormErrors> for AppError {
    fn from(errors: FormErrors) -> Self {
        AppError::with_source(ErrorKind::Validation, errors.to_string(), errors)
    }
}
