//! Task CRUD scoped to the requesting user.

pub mod service;

pub use service::{TaskInput, TaskOverview, TaskService};
