//! # rsvp Config
//!
//! Configuration structures loaded once from environment variables at process
//! start and shared read-only afterwards:
//!
//! - [`jwt`]: token signing secret and lifetimes
//! - [`signup`]: invite code, password policy thresholds and hash cost
//! - [`server`]: bind address and per-request timeout
//! - [`cors`]: allowed cross-origin callers
//!
//! # Example
//!
//! ```ignore
//! use rsvp_config::{JwtConfig, ServerConfig, SignupConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let signup_config = SignupConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod server;
pub mod signup;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
pub use signup::{SignupConfig, hash_cost_from_env, password_policy_from_env};

use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Reads `key` and parses it, falling back to `default` when unset or blank.
///
/// # Panics
///
/// Panics naming `key` when a value is set but does not parse.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    parse_or(key, env::var(key).ok().as_deref(), default)
}

fn parse_or<T: FromStr>(key: &str, raw: Option<&str>, default: T) -> T {
    match raw.map(str::trim) {
        None | Some("") => default,
        Some(value) => value
            .parse()
            .unwrap_or_else(|_| panic!("{key} has an invalid value: {value:?}")),
    }
}

/// # Panics
///
/// Panics naming `key` unless `value` is greater than zero.
pub(crate) fn positive<T: PartialOrd + Default + Display>(key: &str, value: T) -> T {
    if value <= T::default() {
        panic!("{key} must be greater than zero, got {value}");
    }
    value
}

/// Reads a variable that must be present and non-empty.
///
/// # Panics
///
/// Panics naming `key` when it is unset or blank.
pub(crate) fn required_env(key: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => panic!("{key} must be set"),
    }
}
