//! # taskhub-service
//!
//! Business logic service layer for TaskHub. Services receive their
//! stores and auth components at construction time as `Arc` references
//! and take a [`RequestContext`] for every user-initiated operation.

pub mod context;
pub mod form;
pub mod task;
pub mod user;

pub use context::RequestContext;
pub use form::FormErrors;
pub use task::{TaskInput, TaskOverview, TaskService};
pub use user::{AccountService, AdminUserService, NewUser};
