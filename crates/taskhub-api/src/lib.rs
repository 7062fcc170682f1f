//! # taskhub-api
//!
//! HTTP layer for TaskHub built on Axum.
//!
//! Serves server-rendered HTML pages for the task list and the account
//! flows, with cookie sessions, request logging, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod views;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
