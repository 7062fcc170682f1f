//! In-memory stores using a Tokio `RwLock` for single-process deployments
//! and tests. Data does not survive a restart.

pub mod session;
pub mod task;
pub mod user;

pub use session::MemorySessionStore;
pub use task::MemoryTaskStore;
pub use user::MemoryUserStore;
