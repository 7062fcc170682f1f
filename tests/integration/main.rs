//! HTTP-level tests run against the full router over in-memory stores.

mod auth_test;
mod helpers;
mod task_test;
