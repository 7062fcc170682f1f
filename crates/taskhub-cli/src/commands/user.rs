//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use taskhub_core::config::AppConfig;
use taskhub_core::error::AppError;
use taskhub_entity::user::User;
use taskhub_service::NewUser;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a user account
    Create {
        /// Username
        #[arg(short, long)]
        username: Option<String>,
        /// Given name
        #[arg(long)]
        first_name: Option<String>,
        /// Family name
        #[arg(long)]
        last_name: Option<String>,
        /// Email
        #[arg(short, long)]
        email: Option<String>,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// List all users
    List,
    /// Set a user's password
    SetPassword {
        /// Username
        username: String,
        /// New password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Allow a user to log in again
    Activate {
        /// Username
        username: String,
    },
    /// Block a user from logging in and end their sessions
    Deactivate {
        /// Username
        username: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: i64,
    /// Username
    username: String,
    /// Full name
    name: String,
    /// Email
    email: String,
    /// Active flag
    active: bool,
    /// Joined at
    date_joined: String,
    /// Last login
    last_login: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.get(),
            username: u.username.clone(),
            name: format!("{} {}", u.first_name, u.last_name).trim().to_string(),
            email: u.email.clone(),
            active: u.is_active,
            date_joined: u.date_joined.format("%Y-%m-%d %H:%M").to_string(),
            last_login: u
                .last_login
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "never".to_string()),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let service = super::admin_service(config).await?;

    match &args.command {
        UserCommand::Create {
            username,
            first_name,
            last_name,
            email,
            password,
        } => {
            let new_user = NewUser {
                username: super::prompt_text(username, "Username", false)?,
                first_name: super::prompt_text(first_name, "First name (optional)", true)?,
                last_name: super::prompt_text(last_name, "Last name (optional)", true)?,
                email: super::prompt_text(email, "Email (optional)", true)?,
                password: super::prompt_password(password, "Password")?,
            };

            let user = service.create_user(new_user).await?;
            output::print_success(&format!(
                "User '{}' created (id: {})",
                user.username, user.id
            ));
        }
        UserCommand::List => {
            let users = service.list_users().await?;
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
        }
        UserCommand::SetPassword { username, password } => {
            let password = super::prompt_password(password, "New password")?;
            service.set_password(username, &password).await?;
            output::print_success(&format!("Password set for user '{username}'"));
        }
        UserCommand::Activate { username } => {
            service.set_active(username, true).await?;
            output::print_success(&format!("User '{username}' activated"));
        }
        UserCommand::Deactivate { username } => {
            service.set_active(username, false).await?;
            output::print_success(&format!("User '{username}' deactivated"));
        }
    }

    Ok(())
}
