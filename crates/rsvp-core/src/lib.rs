//! # rsvp Core
//!
//! Foundational types shared by every rsvp crate:
//!
//! - [`errors`]: [`AppError`], the HTTP-aware error carried through handlers
//! - [`policy`]: the password complexity policy applied at signup
//! - [`password`]: bcrypt hashing and verification of credentials
//!
//! # Example
//!
//! ```ignore
//! use rsvp_core::{PasswordHasher, PasswordPolicy};
//!
//! let policy = PasswordPolicy::default();
//! policy
//!     .check("ASdf12#$")
//!     .map_err(|msg| AppError::unprocessable(anyhow::anyhow!(msg)))?;
//!
//! let hasher = PasswordHasher::new(14)?;
//! let hashed = hasher.hash("ASdf12#$")?;
//! assert!(hasher.verify(&hashed, "ASdf12#$"));
//! ```

pub mod errors;
pub mod password;
pub mod policy;

pub use errors::AppError;
pub use password::{DEFAULT_HASH_COST, HashError, MAX_PASSWORD_BYTES, PasswordHasher};
pub use policy::{PasswordPolicy, PolicyReport, evaluate};
