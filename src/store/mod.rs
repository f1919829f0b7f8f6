//! Identity persistence contract.
//!
//! The auth flows and middleware only ever talk to storage through
//! [`IdentityStore`]. Every lookup ignores soft-deleted identities, and
//! [`IdentityStore::create`] must reject a second live identity with the same
//! email even when two signups race: the application-level duplicate check
//! in signup is only a pre-check.
//!
//! - [`postgres`]: the production store, backed by the `users` table
//! - [`memory`]: an in-process store for tests (`test-utils` feature)

use async_trait::async_trait;
use rsvp_models::{Identity, NewIdentity, Role};
use thiserror::Error;
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryIdentityStore;
pub use postgres::PgIdentityStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A live identity already uses this email.
    #[error("an identity with this email already exists")]
    Conflict,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict)
    }
}

#[async_trait]
pub trait IdentityStore: Send + Sync + 'static {
    /// Email comparison is case-insensitive.
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, StoreError>;

    async fn list(&self) -> Result<Vec<Identity>, StoreError>;

    async fn create(&self, identity: NewIdentity) -> Result<Identity, StoreError>;

    /// Replaces the stored token pair. Returns `false` if no live identity matched.
    async fn update_tokens(
        &self,
        id: Uuid,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<bool, StoreError>;

    async fn update_profile(
        &self,
        id: Uuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<Option<Identity>, StoreError>;

    async fn update_role(&self, id: Uuid, role: Role) -> Result<Option<Identity>, StoreError>;

    /// Marks the identity deleted and clears its tokens. Returns `false` if no
    /// live identity matched.
    async fn soft_delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
