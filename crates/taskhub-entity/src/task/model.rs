//! Task entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use taskhub_core::types::{TaskId, UserId};

/// Maximum length of a task title, in characters.
pub const TITLE_MAX_LENGTH: usize = 50;

/// A to-do item owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,
    /// The owning user. Tasks without an owner are never shown to anyone.
    pub owner_id: Option<UserId>,
    /// Short title.
    pub title: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Whether the task is done.
    pub completed: bool,
    /// When the task was created. Never changes afterwards.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Check whether the task belongs to the given user.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == Some(user_id)
    }

    /// Title for display, falling back to a placeholder.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(brez naslova)")
    }
}

/// Data required to create a new task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// The owning user.
    pub owner_id: UserId,
    /// Title.
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Completion flag.
    pub completed: bool,
}

/// Editable fields of an existing task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New completion flag.
    pub completed: bool,
}
