//! Request context carrying the authenticated user and session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskhub_core::types::UserId;

/// Context for the current authenticated request.
///
/// Extracted by the HTTP layer and passed into service methods so that
/// every operation knows *who* is acting and from *which* session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The username.
    pub username: String,
    /// The current session ID.
    pub session_id: Uuid,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context stamped with the current time.
    pub fn new(user_id: UserId, username: impl Into<String>, session_id: Uuid) -> Self {
        Self {
            user_id,
            username: username.into(),
            session_id,
            request_time: Utc::now(),
        }
    }
}
