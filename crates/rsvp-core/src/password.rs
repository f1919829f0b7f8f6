//! Credential hashing with bcrypt.
//!
//! The cost factor is fixed when the [`PasswordHasher`] is built at startup.
//! Construction hashes a throwaway value, so an unusable cost or a broken
//! entropy source stops the process before it serves a request instead of
//! surfacing later as per-request failures.
//!
//! bcrypt only reads the first 72 bytes of its input. Hashing and checking
//! real credentials go through the non-truncating variants, so a longer
//! password is refused outright instead of colliding with its own prefix.

use bcrypt::{BcryptError, hash, non_truncating_hash, non_truncating_verify, verify};
use thiserror::Error;

/// Cost used when none is configured.
pub const DEFAULT_HASH_COST: u32 = 14;

/// Longest input bcrypt reads in full.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("bcrypt cost {0} is outside the supported range 4..=31")]
    InvalidCost(u32),
    #[error("password is {0} bytes long, at most {MAX_PASSWORD_BYTES} are supported")]
    TooLong(usize),
    #[error("failed to hash password: {0}")]
    Hash(#[source] bcrypt::BcryptError),
}

#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    // Verified against when a login names an unknown account, so that path
    // spends the same bcrypt work as a wrong password.
    dummy_hash: String,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self, HashError> {
        if !(4..=31).contains(&cost) {
            return Err(HashError::InvalidCost(cost));
        }
        let dummy_hash = hash("rsvp-dummy-credential", cost).map_err(HashError::Hash)?;
        Ok(Self { cost, dummy_hash })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        non_truncating_hash(password, self.cost).map_err(|e| match e {
            BcryptError::Truncation(len) => HashError::TooLong(len),
            other => HashError::Hash(other),
        })
    }

    /// Returns `false` for a mismatch, for a candidate longer than
    /// [`MAX_PASSWORD_BYTES`] and for a stored hash that cannot be parsed.
    pub fn verify(&self, hashed: &str, candidate: &str) -> bool {
        match non_truncating_verify(candidate, hashed) {
            Ok(valid) => valid,
            Err(BcryptError::Truncation(_)) => false,
            Err(e) => {
                tracing::error!(error = %e, "Stored password hash is unreadable");
                false
            }
        }
    }

    /// Burns one verification for a login whose account does not exist.
    pub fn verify_dummy(&self, candidate: &str) -> bool {
        let _ = verify(candidate, &self.dummy_hash);
        false
    }
}
