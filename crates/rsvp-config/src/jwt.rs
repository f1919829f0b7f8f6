//! Token signing configuration.
//!
//! The signing secret has no default: a process started without `JWT_SECRET`
//! panics in [`JwtConfig::from_env`] rather than signing tokens with a
//! guessable key.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: symmetric HMAC key (required, non-empty)
//! - `JWT_ACCESS_EXPIRY`: access token lifetime in seconds (default 24 hours)
//! - `JWT_REFRESH_EXPIRY`: refresh token lifetime in seconds (default 7 days)
//!
//! Lifetimes must be whole, positive numbers of seconds.

use crate::{env_or, positive, required_env};

pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 24 * 60 * 60;
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 7 * 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

impl JwtConfig {
    /// Config with the default lifetimes.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
            refresh_token_expiry: DEFAULT_REFRESH_TOKEN_EXPIRY,
        }
    }

    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is unset or blank, or a lifetime is unparsable
    /// or not positive.
    pub fn from_env() -> Self {
        Self {
            secret: required_env("JWT_SECRET"),
            access_token_expiry: positive(
                "JWT_ACCESS_EXPIRY",
                env_or("JWT_ACCESS_EXPIRY", DEFAULT_ACCESS_TOKEN_EXPIRY),
            ),
            refresh_token_expiry: positive(
                "JWT_REFRESH_EXPIRY",
                env_or("JWT_REFRESH_EXPIRY", DEFAULT_REFRESH_TOKEN_EXPIRY),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_lifetimes() {
        let config = JwtConfig::new("secret");
        assert_eq!(config.access_token_expiry, 86_400);
        assert_eq!(config.refresh_token_expiry, 604_800);
    }

    #[test]
    fn test_refresh_outlives_access_by_default() {
        assert!(DEFAULT_REFRESH_TOKEN_EXPIRY > DEFAULT_ACCESS_TOKEN_EXPIRY);
    }
}
