//! Administrative user management: creation, password resets, activation.

use std::sync::Arc;

use tracing::info;

use taskhub_auth::password::{PasswordHasher, PasswordPolicy, PasswordSubject};
use taskhub_auth::session::SessionManager;
use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_database::store::UserStore;
use taskhub_entity::user::{CreateUser, User};

use crate::form::FormErrors;

use super::username::validate_username;

/// Data for creating a user outside the registration form.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    /// Username.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Initial password.
    pub password: String,
}

/// Handles administrative user management operations.
#[derive(Clone)]
pub struct AdminUserService {
    /// User persistence.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    policy: Arc<PasswordPolicy>,
    /// Session manager.
    sessions: SessionManager,
}

impl std::fmt::Debug for AdminUserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminUserService").finish()
    }
}

impl AdminUserService {
    /// Creates a new admin user service.
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

    /// Creates a user after checking the username and password policy.
    pub async fn create_user(&self, req: NewUser) -> AppResult<User> {
        let mut errors = FormErrors::new();
        if let Err(message) = validate_username(&req.username) {
            errors.add("username", message);
        }
        let subject = PasswordSubject {
            username: &req.username,
            first_name: &req.first_name,
            last_name: &req.last_name,
            email: &req.email,
        };
        if let Err(violation) = self.policy.validate(&req.password, Some(&subject)) {
            errors.extend("password", violation.messages());
        }
        errors.into_result()?;

        let user = self
            .users
            .create(&CreateUser {
                username: req.username,
                first_name: req.first_name,
                last_name: req.last_name,
                email: req.email,
                password_hash: self.hasher.hash_password(&req.password)?,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User created by admin");
        Ok(user)
    }

    /// Lists all users ordered by username.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.list().await
    }

    /// Resets a user's password and ends all of their sessions.
    pub async fn set_password(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self.find(username).await?;
        self.policy
            .validate(password, Some(&PasswordSubject::from(&user)))?;

        let password_hash = self.hasher.hash_password(password)?;
        self.users.update_password(user.id, &password_hash).await?;
        self.sessions.revoke_other_sessions(user.id, None).await?;

        info!(user_id = %user.id, "Password reset by admin");
        Ok(user)
    }

    /// Activates or deactivates an account. Deactivation ends all sessions.
    pub async fn set_active(&self, username: &str, active: bool) -> AppResult<User> {
        let mut user = self.find(username).await?;
        self.users.set_active(user.id, active).await?;
        if !active {
            self.sessions.revoke_other_sessions(user.id, None).await?;
        }
        user.is_active = active;

        info!(user_id = %user.id, active, "Account status changed");
        Ok(user)
    }

    async fn find(&self, username: &str) -> AppResult<User> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskhub_auth::password::{CommonPasswordValidator, PasswordPolicyViolation};
    use taskhub_core::config::{PasswordPolicyConfig, SessionConfig};
    use taskhub_core::error::ErrorKind;
    use taskhub_database::Stores;

    fn setup() -> (AdminUserService, SessionManager) {
        let stores = Stores::memory();
        let hasher = Arc::new(PasswordHasher::new());
        let policy = Arc::new(PasswordPolicy::with_common_list(
            &PasswordPolicyConfig::default(),
            CommonPasswordValidator::from_lines(["password123"]),
        ));
        let sessions = SessionManager::new(
            stores.sessions.clone(),
            stores.users.clone(),
            hasher.clone(),
            SessionConfig::default(),
        );
        (
            AdminUserService::new(stores.users.clone(), hasher, policy, sessions.clone()),
            sessions,
        )
    }

    fn new_user(password: &str) -> NewUser {
        NewUser {
            username: "mojca".to_string(),
            first_name: "Mojca".to_string(),
            last_name: "Kovač".to_string(),
            email: "mojca.kovac@example.si".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_checks_all_attributes() {
        let (service, _) = setup();
        let err = service
            .create_user(new_user("mojca.kovac@example.si"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        let errors = err.source_as::<FormErrors>().expect("form errors");
        assert_eq!(
            errors.field("password"),
            ["Geslo je preveč podobno uporabniškemu imenu."]
        );
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let (service, _) = setup();
        service
            .create_user(new_user("zeleno-jabolko-7"))
            .await
            .expect("create");
        let users = service.list_users().await.expect("list");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "mojca.kovac@example.si");
    }

    #[tokio::test]
    async fn test_set_password_applies_policy_and_ends_sessions() {
        let (service, sessions) = setup();
        service
            .create_user(new_user("zeleno-jabolko-7"))
            .await
            .expect("create");
        let login = sessions.login("mojca", "zeleno-jabolko-7").await.expect("login");

        let err = service.set_password("mojca", "password123").await.unwrap_err();
        assert!(err.source_as::<PasswordPolicyViolation>().is_some());

        service
            .set_password("mojca", "modra-sliva-88")
            .await
            .expect("reset");
        assert!(sessions.resolve(&login.token).await.expect("resolve").is_none());
        assert!(sessions.login("mojca", "modra-sliva-88").await.is_ok());
    }

    #[tokio::test]
    async fn test_deactivate_blocks_login() {
        let (service, sessions) = setup();
        service
            .create_user(new_user("zeleno-jabolko-7"))
            .await
            .expect("create");

        let user = service.set_active("mojca", false).await.expect("deactivate");
        assert!(!user.is_active);
        assert!(sessions.login("mojca", "zeleno-jabolko-7").await.is_err());

        service.set_active("mojca", true).await.expect("activate");
        assert!(sessions.login("mojca", "zeleno-jabolko-7").await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let (service, _) = setup();
        let err = service.set_active("nihce", true).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
