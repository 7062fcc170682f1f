//! Account self-service: registration and password changes.

use std::sync::Arc;

use tracing::info;

use taskhub_auth::password::{PasswordHasher, PasswordPolicy, PasswordSubject};
use taskhub_auth::session::SessionManager;
use taskhub_core::error::{AppError, ErrorKind};
use taskhub_core::result::AppResult;
use taskhub_database::store::UserStore;
use taskhub_entity::user::{CreateUser, User};

use crate::context::RequestContext;
use crate::form::FormErrors;

use super::username::validate_username;
use super::{PASSWORD_MISMATCH, USERNAME_TAKEN};

const REQUIRED: &str = "To polje je obvezno.";
const WRONG_CURRENT_PASSWORD: &str = "Trenutno geslo ni pravilno.";

/// Handles registration and password changes for end users.
#[derive(Clone)]
pub struct AccountService {
    /// User persistence.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    policy: Arc<PasswordPolicy>,
    /// Session manager, for revoking sessions after a password change.
    sessions: SessionManager,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("policy", &self.policy)
            .finish()
    }
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        policy: Arc<PasswordPolicy>,
        sessions: SessionManager,
    ) -> Self {
        Self {
            users,
            hasher,
            policy,
            sessions,
        }
    }

    /// Help texts shown under the new-password field.
    pub fn password_help_texts(&self) -> Vec<String> {
        self.policy.help_texts()
    }

    /// Registers a new user.
    ///
    /// All problems are reported together as [`FormErrors`] keyed by
    /// `username`, `password`, and `password_confirmation`. The password
    /// policy only runs once both password fields agree.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        confirmation: &str,
    ) -> AppResult<User> {
        let mut errors = FormErrors::new();

        if let Err(message) = validate_username(username) {
            errors.add("username", message);
        } else if self.users.username_exists(username).await? {
            errors.add("username", USERNAME_TAKEN);
        }

        let subject = PasswordSubject::candidate(username);
        self.check_new_password(&mut errors, password, confirmation, &subject);
        errors.into_result()?;

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .users
            .create(&CreateUser {
                username: username.to_string(),
                password_hash,
                ..Default::default()
            })
            .await
            .map_err(|e| match e.kind {
                ErrorKind::Conflict => username_taken(),
                _ => e,
            })?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Changes the requesting user's password and ends their other sessions.
    ///
    /// Errors are keyed by `current_password`, `password`, and
    /// `password_confirmation`.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
        confirmation: &str,
    ) -> AppResult<()> {
        let user = self
            .users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let mut errors = FormErrors::new();
        if !self
            .hasher
            .verify_password(current_password, &user.password_hash)?
        {
            errors.add("current_password", WRONG_CURRENT_PASSWORD);
        }
        self.check_new_password(
            &mut errors,
            new_password,
            confirmation,
            &PasswordSubject::from(&user),
        );
        errors.into_result()?;

        let password_hash = self.hasher.hash_password(new_password)?;
        self.users.update_password(user.id, &password_hash).await?;
        self.sessions
            .revoke_other_sessions(user.id, Some(ctx.session_id))
            .await?;

        info!(user_id = %user.id, "Password changed");
        Ok(())
    }

    fn check_new_password(
        &self,
        errors: &mut FormErrors,
        password: &str,
        confirmation: &str,
        subject: &PasswordSubject<'_>,
    ) {
        if password.is_empty() {
            errors.add("password", REQUIRED);
        }
        if confirmation.is_empty() {
            errors.add("password_confirmation", REQUIRED);
        }
        if password.is_empty() || confirmation.is_empty() {
            return;
        }

        if password != confirmation {
            errors.add("password_confirmation", PASSWORD_MISMATCH);
        } else if let Err(violation) = self.policy.validate(password, Some(subject)) {
            errors.extend("password", violation.messages());
        }
    }
}

fn username_taken() -> AppError {
    let mut errors = FormErrors::new();
    errors.add("username", USERNAME_TAKEN);
    errors.into()
}
