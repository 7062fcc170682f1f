//! CLI command definitions and dispatch.

pub mod migrate;
pub mod password;
pub mod user;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use taskhub_auth::{PasswordHasher, PasswordPolicy, SessionManager};
use taskhub_core::config::AppConfig;
use taskhub_core::error::AppError;
use taskhub_database::Stores;
use taskhub_service::AdminUserService;

use crate::output::OutputFormat;

/// TaskHub administration tool
#[derive(Debug, Parser)]
#[command(name = "taskhub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (without extension)
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User account management
    User(user::UserArgs),
    /// Password policy tools
    Password(password::PasswordArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = load_config(&self.config)?;
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config, self.format).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
            Commands::Password(args) => password::execute(args, &config, self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::from_file(config_path)
}

/// Helper: connect the stores and build the admin user service
pub async fn admin_service(config: &AppConfig) -> Result<AdminUserService, AppError> {
    let stores = Stores::connect(&config.database).await?;
    let policy = Arc::new(PasswordPolicy::from_config(&config.auth.password)?);
    let hasher = Arc::new(PasswordHasher::new());
    let sessions = SessionManager::new(
        Arc::clone(&stores.sessions),
        Arc::clone(&stores.users),
        Arc::clone(&hasher),
        config.session.clone(),
    );

    Ok(AdminUserService::new(
        Arc::clone(&stores.users),
        hasher,
        policy,
        sessions,
    ))
}

/// Helper: read a value from the flag or prompt for it
pub fn prompt_text(value: &Option<String>, prompt: &str, allow_empty: bool) -> Result<String, AppError> {
    match value {
        Some(v) => Ok(v.clone()),
        None => dialoguer::Input::new()
            .with_prompt(prompt)
            .allow_empty(allow_empty)
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {e}"))),
    }
}

/// Helper: read a password from the flag or prompt twice for it
pub fn prompt_password(value: &Option<String>, prompt: &str) -> Result<String, AppError> {
    match value {
        Some(p) => Ok(p.clone()),
        None => dialoguer::Password::new()
            .with_prompt(prompt)
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}"))),
    }
}
