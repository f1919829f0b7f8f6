//! Administrative operations behind `rsvp-cli`. These are the only way to
//! create an ADMIN without an existing admin account.

use rsvp_core::{HashError, PasswordHasher, PasswordPolicy};
use rsvp_models::{Identity, NewIdentity, Role};
use thiserror::Error;
use tracing::info;

use crate::modules::auth::service::normalize_email;
use crate::store::{IdentityStore, StoreError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    WeakPassword(String),
    #[error("User with email {0} already exists")]
    EmailTaken(String),
    #[error("No user with email {0}")]
    UnknownEmail(String),
    #[error("Failed to hash password: {0}")]
    Hash(#[from] HashError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Creates an ADMIN identity, applying the same password policy as signup.
pub async fn create_admin(
    store: &dyn IdentityStore,
    policy: &PasswordPolicy,
    hasher: &PasswordHasher,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Result<Identity, CliError> {
    policy.check(password).map_err(CliError::WeakPassword)?;
    let password_hash = hasher.hash(password)?;

    let email = normalize_email(email);
    let identity = store
        .create(NewIdentity {
            email: email.clone(),
            password_hash,
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            role: Role::Admin,
        })
        .await
        .map_err(|e| match e {
            StoreError::Conflict => CliError::EmailTaken(email),
            other => CliError::Store(other),
        })?;

    info!(user_id = %identity.id, "Admin created from CLI");
    Ok(identity)
}

/// Sets the role of the live identity registered under `email`.
pub async fn promote(
    store: &dyn IdentityStore,
    email: &str,
    role: Role,
) -> Result<Identity, CliError> {
    let email = normalize_email(email);
    let identity = store
        .find_by_email(&email)
        .await?
        .ok_or_else(|| CliError::UnknownEmail(email.clone()))?;

    let updated = store
        .update_role(identity.id, role)
        .await?
        .ok_or(CliError::UnknownEmail(email))?;

    info!(user_id = %updated.id, role = %role, "Role changed from CLI");
    Ok(updated)
}
