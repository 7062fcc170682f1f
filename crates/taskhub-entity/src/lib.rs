//! # taskhub-entity
//!
//! Domain entity models for TaskHub. Every struct in this crate
//! represents a database table row or the input used to create or
//! update one. Row types derive `sqlx::FromRow`.

pub mod session;
pub mod task;
pub mod user;
