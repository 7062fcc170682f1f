//! Password policy tools.

use clap::{Args, Subcommand};
use serde::Serialize;

use taskhub_auth::password::{PasswordError, PasswordPolicy, PasswordSubject, strength_score};
use taskhub_core::config::AppConfig;
use taskhub_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for password commands
#[derive(Debug, Args)]
pub struct PasswordArgs {
    /// Password subcommand
    #[command(subcommand)]
    pub command: PasswordCommand,
}

/// Password subcommands
#[derive(Debug, Subcommand)]
pub enum PasswordCommand {
    /// Check a password against the configured policy
    Check {
        /// Compare against this username as well
        #[arg(short, long)]
        username: Option<String>,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Show the policy requirements
    Rules,
}

/// Result of a policy check
#[derive(Debug, Serialize)]
struct CheckReport {
    accepted: bool,
    errors: Vec<String>,
    strength: u8,
}

/// Execute password commands
pub async fn execute(
    args: &PasswordArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let policy = PasswordPolicy::from_config(&config.auth.password)?;

    match &args.command {
        PasswordCommand::Check { username, password } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };
            let subject = username.as_deref().map(PasswordSubject::candidate);
            let errors: Vec<String> = policy
                .validate(&password, subject.as_ref())
                .err()
                .map(|violation| {
                    violation
                        .errors
                        .iter()
                        .map(PasswordError::detailed_message)
                        .collect()
                })
                .unwrap_or_default();
            let inputs: Vec<&str> = username.as_deref().into_iter().collect();

            let report = CheckReport {
                accepted: errors.is_empty(),
                errors,
                strength: strength_score(&password, &inputs),
            };

            match format {
                OutputFormat::Json => output::print_item(&report, format),
                OutputFormat::Table => {
                    if report.accepted {
                        output::print_success("Password satisfies the policy.");
                    } else {
                        for message in &report.errors {
                            output::print_error(message);
                        }
                    }
                    if report.strength < 3 {
                        output::print_warning(&format!(
                            "Estimated strength {}/4; consider a longer passphrase.",
                            report.strength
                        ));
                    } else {
                        output::print_kv("Estimated strength", &format!("{}/4", report.strength));
                    }
                }
            }

            if !report.accepted {
                return Err(AppError::validation("Password rejected by policy"));
            }
        }
        PasswordCommand::Rules => {
            for text in policy.help_texts() {
                println!("  • {text}");
            }
        }
    }

    Ok(())
}
