use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use rsvp_models::{Identity, NewIdentity, Role};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{IdentityStore, StoreError};

/// In-process identity store.
///
/// The duplicate-email check and the insert happen under one write lock, so
/// it enforces the same single-live-email rule as the database index.
///
/// [`set_unavailable`](Self::set_unavailable) makes every call fail the way
/// an exhausted connection pool would.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    identities: RwLock<HashMap<Uuid, Identity>>,
    unavailable: AtomicBool,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a record regardless of soft deletion, for assertions in tests.
    pub async fn raw(&self, id: Uuid) -> Option<Identity> {
        self.identities.read().await.get(&id).cloned()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

fn live(identity: &Identity) -> Option<&Identity> {
    (!identity.is_deleted()).then_some(identity)
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        self.ensure_available()?;
        let identities = self.identities.read().await;
        Ok(identities
            .values()
            .filter_map(live)
            .find(|i| i.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, StoreError> {
        self.ensure_available()?;
        let identities = self.identities.read().await;
        Ok(identities.get(&id).and_then(live).cloned())
    }

    async fn list(&self) -> Result<Vec<Identity>, StoreError> {
        self.ensure_available()?;
        let identities = self.identities.read().await;
        let mut all: Vec<Identity> = identities.values().filter_map(live).cloned().collect();
        all.sort_by_key(|i| i.created_at);
        Ok(all)
    }

    async fn create(&self, identity: NewIdentity) -> Result<Identity, StoreError> {
        self.ensure_available()?;
        let mut identities = self.identities.write().await;
        if identities
            .values()
            .filter_map(live)
            .any(|i| i.email.eq_ignore_ascii_case(&identity.email))
        {
            return Err(StoreError::Conflict);
        }

        let now = Utc::now();
        let record = Identity {
            id: Uuid::new_v4(),
            email: identity.email,
            password_hash: Some(identity.password_hash),
            role: identity.role,
            access_token: None,
            refresh_token: None,
            first_name: identity.first_name,
            last_name: identity.last_name,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        identities.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_tokens(
        &self,
        id: Uuid,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<bool, StoreError> {
        self.ensure_available()?;
        let mut identities = self.identities.write().await;
        match identities.get_mut(&id).filter(|i| !i.is_deleted()) {
            Some(identity) => {
                identity.access_token = Some(access_token.to_string());
                identity.refresh_token = Some(refresh_token.to_string());
                identity.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_profile(
        &self,
        id: Uuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<Option<Identity>, StoreError> {
        self.ensure_available()?;
        let mut identities = self.identities.write().await;
        Ok(identities
            .get_mut(&id)
            .filter(|i| !i.is_deleted())
            .map(|identity| {
                if let Some(first_name) = first_name {
                    identity.first_name = first_name.to_string();
                }
                if let Some(last_name) = last_name {
                    identity.last_name = last_name.to_string();
                }
                identity.updated_at = Utc::now();
                identity.clone()
            }))
    }

    async fn update_role(&self, id: Uuid, role: Role) -> Result<Option<Identity>, StoreError> {
        self.ensure_available()?;
        let mut identities = self.identities.write().await;
        Ok(identities
            .get_mut(&id)
            .filter(|i| !i.is_deleted())
            .map(|identity| {
                identity.role = role;
                identity.updated_at = Utc::now();
                identity.clone()
            }))
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool, StoreError> {
        self.ensure_available()?;
        let mut identities = self.identities.write().await;
        match identities.get_mut(&id).filter(|i| !i.is_deleted()) {
            Some(identity) => {
                let now = Utc::now();
                identity.deleted_at = Some(now);
                identity.access_token = None;
                identity.refresh_token = None;
                identity.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
