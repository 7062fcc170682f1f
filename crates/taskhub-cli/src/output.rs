//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use taskhub_auth::PasswordPolicyViolation;
use taskhub_core::error::AppError;
use taskhub_service::FormErrors;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Print a single item as JSON, or as key-value lines for table output
pub fn print_item<T: Serialize>(item: &T, format: OutputFormat) {
    let value = serde_json::to_value(item).unwrap_or_default();
    match format {
        OutputFormat::Table => {
            if let serde_json::Value::Object(map) = value {
                for (key, value) in map {
                    let value = match value {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    };
                    print_kv(&key, &value);
                }
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{key}:"), value);
}

/// Print a command failure, one line per validation message when the
/// error carries them.
pub fn print_app_error(err: &AppError) {
    if let Some(errors) = err.source_as::<FormErrors>() {
        for (field, messages) in errors.iter() {
            for message in messages {
                print_error(&format!("{field}: {message}"));
            }
        }
    } else if let Some(violation) = err.source_as::<PasswordPolicyViolation>() {
        for message in violation.messages() {
            print_error(&format!("password: {message}"));
        }
    } else {
        print_error(&err.to_string());
    }
}
