//! Session cookie configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Upper bound for `lifetime_hours` (ten years).
pub const MAX_LIFETIME_HOURS: u64 = 87_600;

/// Upper bound for `cleanup_interval_minutes` (one week).
pub const MAX_CLEANUP_INTERVAL_MINUTES: u64 = 10_080;

/// Session management configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Absolute session lifetime in hours.
    #[serde(default = "default_lifetime")]
    pub lifetime_hours: u64,
    /// Mark the cookie `Secure` (requires HTTPS in front of the server).
    #[serde(default)]
    pub secure_cookie: bool,
    /// Interval for expired session cleanup in minutes.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            lifetime_hours: default_lifetime(),
            secure_cookie: false,
            cleanup_interval_minutes: default_cleanup_interval(),
        }
    }
}

impl SessionConfig {
    /// Reject zero or out-of-range durations.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(1..=MAX_LIFETIME_HOURS).contains(&self.lifetime_hours) {
            return Err(AppError::configuration(format!(
                "session.lifetime_hours must be between 1 and {MAX_LIFETIME_HOURS}, got {}",
                self.lifetime_hours
            )));
        }
        if !(1..=MAX_CLEANUP_INTERVAL_MINUTES).contains(&self.cleanup_interval_minutes) {
            return Err(AppError::configuration(format!(
                "session.cleanup_interval_minutes must be between 1 and {MAX_CLEANUP_INTERVAL_MINUTES}, got {}",
                self.cleanup_interval_minutes
            )));
        }
        if self.cookie_name.is_empty() {
            return Err(AppError::configuration("session.cookie_name must not be empty"));
        }
        Ok(())
    }
}

fn default_cookie_name() -> String {
    "taskhub_session".to_string()
}

fn default_lifetime() -> u64 {
    // two weeks
    336
}

fn default_cleanup_interval() -> u64 {
    60
}
