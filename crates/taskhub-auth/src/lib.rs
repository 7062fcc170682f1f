//! # taskhub-auth
//!
//! Authentication for TaskHub.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing and the four-check password policy
//! - `session`: Cookie session tokens, login/logout, and expired-session cleanup

pub mod password;
pub mod session;

pub use password::{
    PasswordError, PasswordHasher, PasswordPolicy, PasswordPolicyViolation, PasswordSubject,
};
pub use session::{LoginResult, SessionCleanup, SessionManager};
