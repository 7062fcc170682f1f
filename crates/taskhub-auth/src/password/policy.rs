//! The configured set of password checks.

use std::fmt;
use std::sync::Arc;

use taskhub_core::config::PasswordPolicyConfig;
use taskhub_core::error::AppError;

use super::common::CommonPasswordValidator;
use super::error::{PasswordError, PasswordPolicyViolation};
use super::length::MinimumLengthValidator;
use super::numeric::NumericPasswordValidator;
use super::similarity::UserAttributeSimilarityValidator;
use super::subject::PasswordSubject;

/// One password check.
pub trait PasswordValidator: Send + Sync + fmt::Debug {
    /// Check a candidate password, optionally against the user it is for.
    fn validate(
        &self,
        password: &str,
        user: Option<&PasswordSubject<'_>>,
    ) -> Result<(), PasswordError>;

    /// Explanation of the rule, shown next to password fields.
    fn help_text(&self) -> String;
}

/// Runs every configured check and collects all failures.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    validators: Vec<Arc<dyn PasswordValidator>>,
}

impl PasswordPolicy {
    /// Build the standard four checks, loading the common-password list
    /// from `config.common_passwords_path`.
    pub fn from_config(config: &PasswordPolicyConfig) -> Result<Self, AppError> {
        let common = CommonPasswordValidator::load(&config.common_passwords_path)?;
        Ok(Self::with_common_list(config, common))
    }

    /// Build the standard four checks around an already loaded list.
    pub fn with_common_list(
        config: &PasswordPolicyConfig,
        common: CommonPasswordValidator,
    ) -> Self {
        Self::new(vec![
            Arc::new(MinimumLengthValidator::new(config.min_length)),
            Arc::new(UserAttributeSimilarityValidator::new(
                config.user_attributes.clone(),
                config.max_similarity,
            )),
            Arc::new(common),
            Arc::new(NumericPasswordValidator),
        ])
    }

    /// A policy running exactly the given checks, in order.
    pub fn new(validators: Vec<Arc<dyn PasswordValidator>>) -> Self {
        Self { validators }
    }

    /// Run all checks. Fails with every error found, not just the first.
    pub fn validate(
        &self,
        password: &str,
        user: Option<&PasswordSubject<'_>>,
    ) -> Result<(), PasswordPolicyViolation> {
        let errors: Vec<PasswordError> = self
            .validators
            .iter()
            .filter_map(|v| v.validate(password, user).err())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PasswordPolicyViolation { errors })
        }
    }

    /// Help texts of all checks, in order.
    pub fn help_texts(&self) -> Vec<String> {
        self.validators.iter().map(|v| v.help_text()).collect()
    }
}

/// Advisory strength estimate from 0 (weakest) to 4.
///
/// Not part of the policy; used by tooling to give extra feedback.
pub fn strength_score(password: &str, user_inputs: &[&str]) -> u8 {
    u8::from(zxcvbn::zxcvbn(password, user_inputs).score())
}
