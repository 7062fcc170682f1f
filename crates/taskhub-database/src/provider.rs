//! Store set that dispatches to the configured database provider.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use taskhub_core::config::{DatabaseConfig, DatabaseProvider};
use taskhub_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{MemorySessionStore, MemoryTaskStore, MemoryUserStore};
use crate::repositories::{SessionRepository, TaskRepository, UserRepository};
use crate::store::{SessionStore, TaskStore, UserStore};

/// The three stores the application needs, backed by one provider.
///
/// The provider is selected at construction time based on configuration.
#[derive(Clone)]
pub struct Stores {
    /// Task persistence.
    pub tasks: Arc<dyn TaskStore>,
    /// User persistence.
    pub users: Arc<dyn UserStore>,
    /// Session persistence.
    pub sessions: Arc<dyn SessionStore>,
    pool: Option<DatabasePool>,
}

impl Stores {
    /// Build the stores from configuration, connecting to PostgreSQL if
    /// that provider is selected.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Postgres => {
                info!("Initializing PostgreSQL stores");
                let pool = DatabasePool::connect(config).await?;
                Ok(Self::postgres(pool))
            }
            DatabaseProvider::Memory => {
                info!("Initializing in-memory stores");
                Ok(Self::memory())
            }
        }
    }

    /// Stores backed by an existing PostgreSQL pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            tasks: Arc::new(TaskRepository::new(pg.clone())),
            users: Arc::new(UserRepository::new(pg.clone())),
            sessions: Arc::new(SessionRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Fresh, empty in-memory stores.
    pub fn memory() -> Self {
        Self {
            tasks: Arc::new(MemoryTaskStore::new()),
            users: Arc::new(MemoryUserStore::new()),
            sessions: Arc::new(MemorySessionStore::new()),
            pool: None,
        }
    }

    /// The PostgreSQL pool, if this store set is backed by one.
    pub fn pool(&self) -> Option<&DatabasePool> {
        self.pool.as_ref()
    }
}

impl fmt::Debug for Stores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stores")
            .field("postgres", &self.pool.is_some())
            .finish_non_exhaustive()
    }
}
