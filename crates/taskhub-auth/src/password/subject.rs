//! The user identity a password is checked against.

use taskhub_core::config::UserAttribute;
use taskhub_entity::user::User;

/// Borrowed view of the user attributes the similarity check reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordSubject<'a> {
    /// Login name.
    pub username: &'a str,
    /// Given name.
    pub first_name: &'a str,
    /// Family name.
    pub last_name: &'a str,
    /// Email address.
    pub email: &'a str,
}

impl<'a> PasswordSubject<'a> {
    /// A not-yet-created user known only by the submitted username.
    pub fn candidate(username: &'a str) -> Self {
        Self {
            username,
            ..Default::default()
        }
    }

    /// Value of one attribute.
    pub fn attribute(&self, attribute: UserAttribute) -> &'a str {
        match attribute {
            UserAttribute::Username => self.username,
            UserAttribute::FirstName => self.first_name,
            UserAttribute::LastName => self.last_name,
            UserAttribute::Email => self.email,
        }
    }
}

impl<'a> From<&'a User> for PasswordSubject<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            username: &user.username,
            first_name: &user.first_name,
            last_name: &user.last_name,
            email: &user.email,
        }
    }
}
