//! User domain entities.

pub mod model;

pub use model::{CreateUser, USERNAME_MAX_LENGTH, User};
