//! Store traits implemented by the PostgreSQL repositories and the
//! in-memory stores.
//!
//! Every task query that serves a user request takes the owner's id and
//! filters on it, so a caller can never read or mutate another user's
//! task through these traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use taskhub_core::result::AppResult;
use taskhub_core::types::{TaskId, UserId};
use taskhub_entity::session::{CreateSession, Session};
use taskhub_entity::task::{CreateTask, Task, UpdateTask};
use taskhub_entity::user::{CreateUser, User};

/// Persistence of tasks, scoped by owner.
#[async_trait]
pub trait TaskStore: Send + Sync + 'static {
    /// List all tasks owned by `owner`, oldest first.
    async fn list_for_owner(&self, owner: UserId) -> AppResult<Vec<Task>>;

    /// Find a task by id if it is owned by `owner`.
    async fn find_for_owner(&self, id: TaskId, owner: UserId) -> AppResult<Option<Task>>;

    /// Create a new task and return it.
    async fn create(&self, data: &CreateTask) -> AppResult<Task>;

    /// Apply `data` to the task if it is owned by `owner`.
    ///
    /// Returns `None` when no such task exists for that owner.
    async fn update_for_owner(
        &self,
        id: TaskId,
        owner: UserId,
        data: &UpdateTask,
    ) -> AppResult<Option<Task>>;

    /// Delete the task if it is owned by `owner`. Returns `true` if deleted.
    async fn delete_for_owner(&self, id: TaskId, owner: UserId) -> AppResult<bool>;
}

/// Persistence of user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Check whether a username is taken, ignoring case.
    async fn username_exists(&self, username: &str) -> AppResult<bool>;

    /// List all users ordered by username.
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Create a new user. Fails with a conflict if the username is taken.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Replace a user's password hash.
    async fn update_password(&self, id: UserId, password_hash: &str) -> AppResult<()>;

    /// Activate or deactivate an account.
    async fn set_active(&self, id: UserId, active: bool) -> AppResult<()>;

    /// Record a successful login.
    async fn touch_last_login(&self, id: UserId, at: DateTime<Utc>) -> AppResult<()>;
}

/// Persistence of login sessions.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Create a new session and return it.
    async fn create(&self, data: &CreateSession) -> AppResult<Session>;

    /// Find a session by the hash of its token.
    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<Session>>;

    /// Update the last activity timestamp.
    async fn touch(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()>;

    /// Delete one session.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Delete every session of a user except `keep`. Returns the count deleted.
    async fn delete_for_user(&self, user_id: UserId, keep: Option<Uuid>) -> AppResult<u64>;

    /// Delete sessions that expired before `now`. Returns the count deleted.
    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}
