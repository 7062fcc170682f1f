//! Axum middleware stack.

pub mod compression;
pub mod logging;
pub mod timeout;
