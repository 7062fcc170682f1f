//! Cookie session lifecycle: login, lookup, logout, and cleanup.

pub mod cleanup;
pub mod manager;
pub mod token;

pub use cleanup::SessionCleanup;
pub use manager::{LoginResult, SessionManager};
