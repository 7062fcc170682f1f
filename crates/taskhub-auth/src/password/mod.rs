//! Password hashing and the password policy.
//!
//! The policy runs four independent checks (length, similarity to the
//! user's own attributes, membership in a common-password list, and
//! all-digit passwords) and reports every failure at once.

pub mod common;
pub mod error;
pub mod hasher;
pub mod length;
pub mod numeric;
pub mod policy;
pub mod similarity;
pub mod subject;

pub use common::CommonPasswordValidator;
pub use error::{PasswordError, PasswordPolicyViolation};
pub use hasher::PasswordHasher;
pub use length::MinimumLengthValidator;
pub use numeric::NumericPasswordValidator;
pub use policy::{PasswordPolicy, PasswordValidator, strength_score};
pub use similarity::UserAttributeSimilarityValidator;
pub use subject::PasswordSubject;
