//! Similarity to the user's own attributes.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use taskhub_core::config::UserAttribute;

use super::error::PasswordError;
use super::policy::PasswordValidator;
use super::subject::PasswordSubject;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("static pattern is valid"));

/// Rejects passwords too close to the username, names, or email.
///
/// Each attribute value is split on runs of non-word characters and the
/// whole value is compared as well, so `jan.novak@example.com` is checked
/// against `jan`, `novak`, `example`, `com`, and the full address.
#[derive(Debug, Clone)]
pub struct UserAttributeSimilarityValidator {
    attributes: Vec<UserAttribute>,
    max_similarity: f64,
}

impl UserAttributeSimilarityValidator {
    /// Creates the check for the given attributes and similarity ceiling.
    pub fn new(attributes: Vec<UserAttribute>, max_similarity: f64) -> Self {
        Self {
            attributes,
            max_similarity,
        }
    }
}

impl PasswordValidator for UserAttributeSimilarityValidator {
    fn validate(
        &self,
        password: &str,
        user: Option<&PasswordSubject<'_>>,
    ) -> Result<(), PasswordError> {
        let Some(user) = user else {
            return Ok(());
        };
        let password = password.to_lowercase();

        for &attribute in &self.attributes {
            let value = user.attribute(attribute);
            if value.is_empty() {
                continue;
            }
            let too_similar = NON_WORD
                .split(value)
                .chain(std::iter::once(value))
                .any(|part| quick_ratio(&password, &part.to_lowercase()) >= self.max_similarity);
            if too_similar {
                return Err(PasswordError::TooSimilar { attribute });
            }
        }
        Ok(())
    }

    fn help_text(&self) -> String {
        "Geslo ne sme biti preveč podobno ostalim uporabniškim podatkom".to_string()
    }
}

/// Upper bound on the similarity of two strings: `2·M / (|a| + |b|)`
/// where `M` counts characters the two share, with multiplicity.
///
/// Two empty strings are identical (`1.0`).
pub fn quick_ratio(a: &str, b: &str) -> f64 {
    let mut available: HashMap<char, usize> = HashMap::new();
    let mut len_b = 0usize;
    for c in b.chars() {
        *available.entry(c).or_default() += 1;
        len_b += 1;
    }

    let mut len_a = 0usize;
    let mut matches = 0usize;
    for c in a.chars() {
        len_a += 1;
        if let Some(count) = available.get_mut(&c).filter(|n| **n > 0) {
            *count -= 1;
            matches += 1;
        }
    }

    let total = len_a + len_b;
    if total == 0 {
        return 1.0;
    }
    2.0 * matches as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_check() -> UserAttributeSimilarityValidator {
        UserAttributeSimilarityValidator::new(
            vec![
                UserAttribute::Username,
                UserAttribute::FirstName,
                UserAttribute::LastName,
                UserAttribute::Email,
            ],
            1.0,
        )
    }

    #[test]
    fn test_quick_ratio() {
        assert_eq!(quick_ratio("", ""), 1.0);
        assert_eq!(quick_ratio("abc", ""), 0.0);
        assert_eq!(quick_ratio("abcd", "bcda"), 1.0);
        assert_eq!(quick_ratio("aab", "abb"), 2.0 * 2.0 / 6.0);
    }

    #[test]
    fn test_password_equal_to_username_fails() {
        let check = default_check();
        let user = PasswordSubject::candidate("alice");
        assert_eq!(
            check.validate("alice", Some(&user)),
            Err(PasswordError::TooSimilar {
                attribute: UserAttribute::Username
            })
        );
        assert!(check.validate("ALICE", Some(&user)).is_err());
    }

    #[test]
    fn test_unrelated_password_passes() {
        let check = default_check();
        let user = PasswordSubject::candidate("alice");
        assert!(check.validate("zeleni-traktor-77", Some(&user)).is_ok());
    }

    #[test]
    fn test_email_parts_are_compared() {
        let check = default_check();
        let user = PasswordSubject {
            username: "jn",
            email: "janez.novak@example.com",
            ..Default::default()
        };
        assert_eq!(
            check.validate("Novak", Some(&user)),
            Err(PasswordError::TooSimilar {
                attribute: UserAttribute::Email
            })
        );
    }

    #[test]
    fn test_lower_ceiling_catches_near_matches() {
        let check = UserAttributeSimilarityValidator::new(vec![UserAttribute::Username], 0.7);
        let user = PasswordSubject::candidate("alice");
        assert!(check.validate("alice1", Some(&user)).is_err());
    }

    #[test]
    fn test_no_user_or_empty_attributes_pass() {
        let check = default_check();
        assert!(check.validate("alice", None).is_ok());
        assert!(
            check
                .validate("", Some(&PasswordSubject::default()))
                .is_ok()
        );
    }
}
