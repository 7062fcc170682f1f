//! Authentication and password policy configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Password policy applied on registration and password changes.
    #[serde(default)]
    pub password: PasswordPolicyConfig,
}

/// Parameters of the four password checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordPolicyConfig {
    /// Minimum password length in characters.
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    /// User attributes the password must not resemble.
    #[serde(default = "default_user_attributes")]
    pub user_attributes: Vec<UserAttribute>,
    /// Similarity ratio at or above which a password is rejected.
    #[serde(default = "default_max_similarity")]
    pub max_similarity: f64,
    /// Path to the common-password list (gzip or plain text).
    #[serde(default = "default_common_passwords_path")]
    pub common_passwords_path: String,
}

impl Default for PasswordPolicyConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            user_attributes: default_user_attributes(),
            max_similarity: default_max_similarity(),
            common_passwords_path: default_common_passwords_path(),
        }
    }
}

/// A user field the similarity check compares passwords against.
///
/// Configuration names outside this set fail deserialization, so an
/// unknown attribute is caught when the config is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserAttribute {
    /// Login name.
    Username,
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Email address.
    Email,
}

impl UserAttribute {
    /// Human-readable field name shown to users.
    pub fn verbose_name(&self) -> &'static str {
        match self {
            Self::Username => "uporabniško ime",
            Self::FirstName => "ime",
            Self::LastName => "priimek",
            Self::Email => "e-poštni naslov",
        }
    }
}

impl fmt::Display for UserAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username => write!(f, "username"),
            Self::FirstName => write!(f, "first_name"),
            Self::LastName => write!(f, "last_name"),
            Self::Email => write!(f, "email"),
        }
    }
}

fn default_min_length() -> usize {
    8
}

fn default_user_attributes() -> Vec<UserAttribute> {
    vec![
        UserAttribute::Username,
        UserAttribute::FirstName,
        UserAttribute::LastName,
        UserAttribute::Email,
    ]
}

fn default_max_similarity() -> f64 {
    1.0
}

fn default_common_passwords_path() -> String {
    "data/common-passwords.txt".to_string()
}
