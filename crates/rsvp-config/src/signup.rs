//! Signup configuration: the shared invite code, password policy thresholds
//! and the bcrypt cost used for new credentials.
//!
//! # Environment Variables
//!
//! - `INVITE_CODE`: shared secret every signup must present (required)
//! - `PASSWORD_MIN_LENGTH`, `PASSWORD_MIN_DIGITS`, `PASSWORD_MIN_SPECIAL`,
//!   `PASSWORD_MIN_UPPER`: policy thresholds (defaults 8, 2, 2, 2)
//! - `BCRYPT_COST`: hash cost factor (default 14)

use rsvp_core::{DEFAULT_HASH_COST, PasswordPolicy};

use crate::{env_or, required_env};

#[derive(Clone, Debug)]
pub struct SignupConfig {
    pub invite_code: String,
    pub password_policy: PasswordPolicy,
    pub hash_cost: u32,
}

impl SignupConfig {
    pub fn new(invite_code: impl Into<String>) -> Self {
        Self {
            invite_code: invite_code.into(),
            password_policy: PasswordPolicy::default(),
            hash_cost: DEFAULT_HASH_COST,
        }
    }

    /// # Panics
    ///
    /// Panics if `INVITE_CODE` is unset or blank.
    pub fn from_env() -> Self {
        Self {
            invite_code: required_env("INVITE_CODE"),
            password_policy: password_policy_from_env(),
            hash_cost: hash_cost_from_env(),
        }
    }
}

/// Policy thresholds alone, for tools that create credentials without an
/// invite code.
pub fn password_policy_from_env() -> PasswordPolicy {
    let defaults = PasswordPolicy::default();
    PasswordPolicy {
        min_length: env_or("PASSWORD_MIN_LENGTH", defaults.min_length),
        min_digits: env_or("PASSWORD_MIN_DIGITS", defaults.min_digits),
        min_special: env_or("PASSWORD_MIN_SPECIAL", defaults.min_special),
        min_upper: env_or("PASSWORD_MIN_UPPER", defaults.min_upper),
    }
}

pub fn hash_cost_from_env() -> u32 {
    env_or("BCRYPT_COST", DEFAULT_HASH_COST)
}
