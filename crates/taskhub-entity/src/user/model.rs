//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use taskhub_core::types::UserId;

/// Maximum length of a username, in characters.
pub const USERNAME_MAX_LENGTH: usize = 150;

/// A registered user.
///
/// Name and email fields hold an empty string when unknown.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Inactive users cannot log in.
    pub is_active: bool,
    /// When the user registered.
    pub date_joined: DateTime<Utc>,
    /// Last successful login time.
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Check if the user can log in right now.
    pub fn can_login(&self) -> bool {
        self.is_active
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
}
