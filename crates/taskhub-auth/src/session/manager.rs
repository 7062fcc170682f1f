//! Session lifecycle manager: login, request lookup, logout.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use taskhub_core::config::SessionConfig;
use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::UserId;
use taskhub_database::store::{SessionStore, UserStore};
use taskhub_entity::session::{CreateSession, Session};
use taskhub_entity::user::User;

use crate::password::PasswordHasher;

use super::token::{generate_token, hash_token};

/// Shown for an unknown username or a wrong password.
pub const INVALID_CREDENTIALS: &str = "Napačno uporabniško ime ali geslo.";

/// Shown when the credentials are right but the account is deactivated.
pub const INACTIVE_ACCOUNT: &str = "Račun ni v uporabi";

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// Raw token for the cookie. Not stored anywhere.
    pub token: String,
    /// Created session.
    pub session: Session,
    /// The authenticated user.
    pub user: User,
}

/// Manages the complete session lifecycle.
#[derive(Clone)]
pub struct SessionManager {
    /// Session persistence.
    sessions: Arc<dyn SessionStore>,
    /// User persistence.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Session configuration.
    config: SessionConfig,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("config", &self.config)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        config: SessionConfig,
    ) -> Self {
        Self {
            sessions,
            users,
            hasher,
            config,
        }
    }

    /// How long a new session stays valid.
    pub fn lifetime(&self) -> Duration {
        Duration::hours(self.config.lifetime_hours as i64)
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Check credentials and open a session.
    ///
    /// Unknown users and wrong passwords produce the same error. The
    /// inactive-account error is only returned after the password matched.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResult> {
        let Some(user) = self.users.find_by_username(username).await? else {
            debug!(username = %username, "Login for unknown user");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login with wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        if !user.can_login() {
            warn!(user_id = %user.id, "Login to inactive account");
            return Err(AppError::authentication(INACTIVE_ACCOUNT));
        }

        let (token, session) = self.create_for_user(user.id).await?;
        self.users.touch_last_login(user.id, session.created_at).await?;

        info!(user_id = %user.id, session_id = %session.id, "User logged in");

        Ok(LoginResult {
            token,
            session,
            user,
        })
    }

    /// Open a session for an already authenticated user.
    pub async fn create_for_user(&self, user_id: UserId) -> AppResult<(String, Session)> {
        let token = generate_token();
        let session = self
            .sessions
            .create(&CreateSession {
                user_id,
                token_hash: hash_token(&token),
                expires_at: Utc::now() + self.lifetime(),
            })
            .await?;
        Ok((token, session))
    }

    /// Look up the session and user behind a cookie token.
    ///
    /// Expired sessions and sessions of missing or inactive users are
    /// deleted and yield `None`.
    pub async fn resolve(&self, token: &str) -> AppResult<Option<(Session, User)>> {
        let Some(session) = self.sessions.find_by_token_hash(&hash_token(token)).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            debug!(session_id = %session.id, "Session expired");
            self.sessions.delete(session.id).await?;
            return Ok(None);
        }

        let user = match self.users.find_by_id(session.user_id).await? {
            Some(user) if user.can_login() => user,
            _ => {
                debug!(session_id = %session.id, "Session user is gone or inactive");
                self.sessions.delete(session.id).await?;
                return Ok(None);
            }
        };

        self.sessions.touch(session.id, Utc::now()).await?;
        Ok(Some((session, user)))
    }

    /// Delete the session behind a cookie token, if any.
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        if let Some(session) = self.sessions.find_by_token_hash(&hash_token(token)).await? {
            self.sessions.delete(session.id).await?;
            info!(user_id = %session.user_id, session_id = %session.id, "User logged out");
        }
        Ok(())
    }

    /// Delete all sessions of a user except `keep`.
    pub async fn revoke_other_sessions(
        &self,
        user_id: UserId,
        keep: Option<Uuid>,
    ) -> AppResult<u64> {
        let removed = self.sessions.delete_for_user(user_id, keep).await?;
        if removed > 0 {
            info!(user_id = %user_id, removed, "Revoked other sessions");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskhub_core::error::ErrorKind;
    use taskhub_database::Stores;
    use taskhub_entity::user::CreateUser;

    async fn setup() -> (SessionManager, Stores, User) {
        let stores = Stores::memory();
        let hasher = Arc::new(PasswordHasher::new());
        let user = stores
            .users
            .create(&CreateUser {
                username: "alice".to_string(),
                password_hash: hasher.hash_password("zeleni-traktor").expect("hash"),
                ..Default::default()
            })
            .await
            .expect("create user");
        let manager = SessionManager::new(
            stores.sessions.clone(),
            stores.users.clone(),
            hasher,
            SessionConfig::default(),
        );
        (manager, stores, user)
    }

    #[tokio::test]
    async fn test_login_then_resolve() {
        let (manager, stores, user) = setup().await;

        let login = manager.login("alice", "zeleni-traktor").await.expect("login");
        assert_eq!(login.user.id, user.id);

        let (session, resolved) = manager
            .resolve(&login.token)
            .await
            .expect("resolve")
            .expect("session exists");
        assert_eq!(session.id, login.session.id);
        assert_eq!(resolved.username, "alice");

        let stored = stores.users.find_by_id(user.id).await.expect("find").expect("user");
        assert!(stored.last_login.is_some());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_the_same() {
        let (manager, _, _) = setup().await;

        let wrong = manager.login("alice", "napacno").await.unwrap_err();
        let unknown = manager.login("bob", "zeleni-traktor").await.unwrap_err();
        assert_eq!(wrong.kind, ErrorKind::Authentication);
        assert_eq!(wrong.message, INVALID_CREDENTIALS);
        assert_eq!(unknown.message, INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_username_match_is_exact() {
        let (manager, _, _) = setup().await;
        let err = manager.login("Alice", "zeleni-traktor").await.unwrap_err();
        assert_eq!(err.message, INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_inactive_account() {
        let (manager, stores, user) = setup().await;
        let login = manager.login("alice", "zeleni-traktor").await.expect("login");
        stores.users.set_active(user.id, false).await.expect("deactivate");

        let err = manager.login("alice", "zeleni-traktor").await.unwrap_err();
        assert_eq!(err.message, INACTIVE_ACCOUNT);
        assert!(manager.resolve(&login.token).await.expect("resolve").is_none());
    }

    #[tokio::test]
    async fn test_logout_invalidates_token() {
        let (manager, _, _) = setup().await;
        let login = manager.login("alice", "zeleni-traktor").await.expect("login");

        manager.logout(&login.token).await.expect("logout");
        assert!(manager.resolve(&login.token).await.expect("resolve").is_none());
        manager.logout(&login.token).await.expect("second logout is a no-op");
    }

    #[tokio::test]
    async fn test_revoke_other_sessions_keeps_current() {
        let (manager, _, user) = setup().await;
        let first = manager.login("alice", "zeleni-traktor").await.expect("login");
        let second = manager.login("alice", "zeleni-traktor").await.expect("login");

        let removed = manager
            .revoke_other_sessions(user.id, Some(second.session.id))
            .await
            .expect("revoke");
        assert_eq!(removed, 1);
        assert!(manager.resolve(&first.token).await.expect("resolve").is_none());
        assert!(manager.resolve(&second.token).await.expect("resolve").is_some());
    }
}
