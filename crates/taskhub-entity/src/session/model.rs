//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use taskhub_core::types::UserId;

/// A logged-in browser session.
///
/// Only the SHA-256 hash of the cookie token is stored; the raw token
/// lives in the browser cookie.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// The user this session belongs to.
    pub user_id: UserId,
    /// Hex SHA-256 hash of the cookie token.
    pub token_hash: String,
    /// When the session was created (login time).
    pub created_at: DateTime<Utc>,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
    /// Last request seen on this session.
    pub last_activity: DateTime<Utc>,
}

impl Session {
    /// Check whether the session has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Data required to create a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    /// The user this session belongs to.
    pub user_id: UserId,
    /// Hex SHA-256 hash of the cookie token.
    pub token_hash: String,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}
