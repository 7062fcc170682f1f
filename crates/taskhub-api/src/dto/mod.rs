//! Form payloads submitted by the HTML pages.

pub mod request;

pub use request::{LoginForm, NextQuery, PasswordChangeForm, RegisterForm, TaskForm};
