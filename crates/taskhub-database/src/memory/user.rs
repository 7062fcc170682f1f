//! In-memory user store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::UserId;
use taskhub_entity::user::{CreateUser, User};

use crate::store::UserStore;

#[derive(Debug, Default)]
struct InnerState {
    next_id: i64,
    users: BTreeMap<UserId, User>,
}

/// User store backed by a map keyed by user id.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    state: Arc<RwLock<InnerState>>,
}

impl MemoryUserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    async fn modify<F>(&self, id: UserId, apply: F) -> AppResult<()>
    where
        F: FnOnce(&mut User) + Send,
    {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        apply(user);
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.username == username).cloned())
    }

    async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let wanted = username.to_lowercase();
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .any(|u| u.username.to_lowercase() == wanted))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let state = self.state.read().await;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let wanted = data.username.to_lowercase();
        let mut state = self.state.write().await;
        if state
            .users
            .values()
            .any(|u| u.username.to_lowercase() == wanted)
        {
            return Err(AppError::conflict(format!(
                "Username '{}' already exists",
                data.username
            )));
        }

        state.next_id += 1;
        let user = User {
            id: UserId::new(state.next_id),
            username: data.username.clone(),
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            is_active: true,
            date_joined: Utc::now(),
            last_login: None,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> AppResult<()> {
        let hash = password_hash.to_string();
        self.modify(id, move |u| u.password_hash = hash).await
    }

    async fn set_active(&self, id: UserId, active: bool) -> AppResult<()> {
        self.modify(id, move |u| u.is_active = active).await
    }

    async fn touch_last_login(&self, id: UserId, at: DateTime<Utc>) -> AppResult<()> {
        self.modify(id, move |u| u.last_login = Some(at)).await
    }
}
