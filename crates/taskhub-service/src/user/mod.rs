//! Account self-service and administrative user management.

pub mod account;
pub mod admin;
pub mod username;

pub use account::AccountService;
pub use admin::{AdminUserService, NewUser};
pub use username::validate_username;

/// Shown when the password and its confirmation differ.
pub const PASSWORD_MISMATCH: &str = "Gesli nista enaki!";

/// Shown when a username is already registered, in any letter case.
pub const USERNAME_TAKEN: &str = "Uporabniško ime je že v uporabi";
