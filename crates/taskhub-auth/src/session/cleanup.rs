//! Expired session cleanup.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time;
use tracing::{error, info};

use taskhub_core::result::AppResult;
use taskhub_database::store::SessionStore;

/// Periodically removes sessions past their expiry.
#[derive(Clone)]
pub struct SessionCleanup {
    sessions: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for SessionCleanup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCleanup").finish()
    }
}

impl SessionCleanup {
    /// Creates a new session cleanup handler.
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    /// Runs a cleanup cycle. Returns the number of sessions removed.
    pub async fn run_cleanup(&self) -> AppResult<u64> {
        let removed = self.sessions.delete_expired(Utc::now()).await?;
        if removed > 0 {
            info!(removed, "Expired sessions removed");
        }
        Ok(removed)
    }

    /// Run a cycle every `interval` until `cancel` turns `true`.
    pub async fn run(&self, interval: Duration, mut cancel: watch::Receiver<bool>) {
        info!(interval_secs = interval.as_secs(), "Session cleanup started");

        loop {
            if let Err(e) = self.run_cleanup().await {
                error!(error = %e, "Session cleanup failed");
            }

            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        break;
                    }
                }
                _ = time::sleep(interval) => {}
            }
        }

        info!("Session cleanup stopped");
    }
}
