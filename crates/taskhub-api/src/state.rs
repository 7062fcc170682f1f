//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use taskhub_auth::password::{PasswordHasher, PasswordPolicy};
use taskhub_auth::session::SessionManager;
use taskhub_core::config::AppConfig;
use taskhub_database::Stores;
use taskhub_service::task::TaskService;
use taskhub_service::user::AccountService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Persistence
    pub stores: Stores,
    /// Cookie session lifecycle
    pub session_manager: SessionManager,
    /// Task CRUD
    pub task_service: Arc<TaskService>,
    /// Registration and password changes
    pub account_service: Arc<AccountService>,
}

impl AppState {
    /// Wire services on top of the stores and a loaded password policy.
    pub fn new(config: AppConfig, stores: Stores, policy: PasswordPolicy) -> Self {
        let hasher = Arc::new(PasswordHasher::new());
        let session_manager = SessionManager::new(
            stores.sessions.clone(),
            stores.users.clone(),
            hasher.clone(),
            config.session.clone(),
        );
        let task_service = Arc::new(TaskService::new(stores.tasks.clone()));
        let account_service = Arc::new(AccountService::new(
            stores.users.clone(),
            hasher,
            Arc::new(policy),
            session_manager.clone(),
        ));

        Self {
            config: Arc::new(config),
            stores,
            session_manager,
            task_service,
            account_service,
        }
    }
}
