use anyhow::anyhow;
use rsvp_core::AppError;
use rsvp_models::{Role, UpdateProfileRequest, UserResponse};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::state::AppState;
use crate::store::IdentityStore;

fn user_not_found(id: Uuid) -> AppError {
    AppError::not_found(anyhow!("User with id {} not found", id))
}

pub struct UserService<'a> {
    store: &'a dyn IdentityStore,
}

impl<'a> UserService<'a> {
    pub fn new(store: &'a dyn IdentityStore) -> Self {
        Self { store }
    }

    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(state.store.as_ref())
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> Result<UserResponse, AppError> {
        let identity = self
            .store
            .find_by_id(id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| user_not_found(id))?;

        Ok(UserResponse::from(&identity))
    }

    #[instrument(skip(self))]
    pub async fn get_users(&self) -> Result<Vec<UserResponse>, AppError> {
        let identities = self.store.list().await.map_err(AppError::database)?;
        Ok(identities.iter().map(UserResponse::from).collect())
    }

    /// Only names can change here. Role changes go through [`Self::update_role`].
    #[instrument(skip(self, dto))]
    pub async fn update_profile(
        &self,
        id: Uuid,
        dto: UpdateProfileRequest,
    ) -> Result<UserResponse, AppError> {
        let first_name = dto.first_name.as_deref().map(str::trim);
        let last_name = dto.last_name.as_deref().map(str::trim);

        let identity = self
            .store
            .update_profile(id, first_name, last_name)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| user_not_found(id))?;

        info!(user_id = %id, "Profile updated");
        Ok(UserResponse::from(&identity))
    }

    #[instrument(skip(self))]
    pub async fn update_role(&self, id: Uuid, role: Role) -> Result<UserResponse, AppError> {
        let identity = self
            .store
            .update_role(id, role)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| user_not_found(id))?;

        info!(user_id = %id, role = %role, "Role changed");
        Ok(UserResponse::from(&identity))
    }

    /// Soft delete. The record stays in storage but disappears from every
    /// lookup, so its outstanding tokens stop authenticating.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self
            .store
            .soft_delete(id)
            .await
            .map_err(AppError::database)?;
        if !deleted {
            return Err(user_not_found(id));
        }

        info!(user_id = %id, "User soft-deleted");
        Ok(())
    }
}
