//! In-memory session store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use taskhub_core::result::AppResult;
use taskhub_core::types::UserId;
use taskhub_entity::session::{CreateSession, Session};

use crate::store::SessionStore;

/// Session store backed by a map keyed by session id.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, data: &CreateSession) -> AppResult<Session> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            token_hash: data.token_hash.clone(),
            created_at: now,
            expires_at: data.expires_at,
            last_activity: now,
        };
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<Session>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .values()
            .find(|s| s.token_hash == token_hash)
            .cloned())
    }

    async fn touch(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        if let Some(session) = self.sessions.write().await.get_mut(&id) {
            session.last_activity = at;
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.sessions.write().await.remove(&id);
        Ok(())
    }

    async fn delete_for_user(&self, user_id: UserId, keep: Option<Uuid>) -> AppResult<u64> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, s| s.user_id != user_id || Some(*id) == keep);
        Ok((before - sessions.len()) as u64)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        Ok((before - sessions.len()) as u64)
    }
}
