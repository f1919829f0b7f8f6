use std::time::Duration;

use crate::{env_or, positive};

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 100;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Upper bound on a single request; exceeding it drops the handler future.
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ServerConfig {
    /// # Panics
    ///
    /// Panics if `REQUEST_TIMEOUT_SECS` is unparsable or zero.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_address: env_or("BIND_ADDRESS", defaults.bind_address),
            request_timeout: Duration::from_secs(positive(
                "REQUEST_TIMEOUT_SECS",
                env_or("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            )),
        }
    }
}
