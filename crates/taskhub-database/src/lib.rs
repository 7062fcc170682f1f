//! # taskhub-database
//!
//! Persistence for TaskHub: the store traits used by the service layer,
//! PostgreSQL repositories implementing them, in-memory stores for
//! development and tests, and the provider dispatch that picks one of
//! the two from configuration.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use provider::Stores;
pub use store::{SessionStore, TaskStore, UserStore};
