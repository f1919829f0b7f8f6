use async_trait::async_trait;
use rsvp_models::{Identity, NewIdentity, Role};
use sqlx::PgPool;
use uuid::Uuid;

use super::{IdentityStore, StoreError};

const IDENTITY_COLUMNS: &str = "id, email, password_hash, role, access_token, refresh_token, \
     first_name, last_name, created_at, updated_at, deleted_at";

#[derive(Clone, Debug)]
pub struct PgIdentityStore {
    db: PgPool,
}

impl PgIdentityStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn map_insert_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::Conflict,
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        let identity = sqlx::query_as::<_, Identity>(&format!(
            "SELECT {IDENTITY_COLUMNS} FROM users \
             WHERE lower(email) = lower($1) AND deleted_at IS NULL"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(identity)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, StoreError> {
        let identity = sqlx::query_as::<_, Identity>(&format!(
            "SELECT {IDENTITY_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(identity)
    }

    async fn list(&self) -> Result<Vec<Identity>, StoreError> {
        let identities = sqlx::query_as::<_, Identity>(&format!(
            "SELECT {IDENTITY_COLUMNS} FROM users WHERE deleted_at IS NULL ORDER BY created_at"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(identities)
    }

    async fn create(&self, identity: NewIdentity) -> Result<Identity, StoreError> {
        // The partial unique index on lower(email) is what keeps concurrent
        // signups with one email from both succeeding.
        sqlx::query_as::<_, Identity>(&format!(
            "INSERT INTO users (email, password_hash, first_name, last_name, role) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {IDENTITY_COLUMNS}"
        ))
        .bind(&identity.email)
        .bind(&identity.password_hash)
        .bind(&identity.first_name)
        .bind(&identity.last_name)
        .bind(identity.role)
        .fetch_one(&self.db)
        .await
        .map_err(map_insert_error)
    }

    async fn update_tokens(
        &self,
        id: Uuid,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE users SET access_token = $2, refresh_token = $3, updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(access_token)
        .bind(refresh_token)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<Option<Identity>, StoreError> {
        let identity = sqlx::query_as::<_, Identity>(&format!(
            "UPDATE users SET first_name = COALESCE($2, first_name), \
             last_name = COALESCE($3, last_name), updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {IDENTITY_COLUMNS}"
        ))
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .fetch_optional(&self.db)
        .await?;

        Ok(identity)
    }

    async fn update_role(&self, id: Uuid, role: Role) -> Result<Option<Identity>, StoreError> {
        let identity = sqlx::query_as::<_, Identity>(&format!(
            "UPDATE users SET role = $2, updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {IDENTITY_COLUMNS}"
        ))
        .bind(id)
        .bind(role)
        .fetch_optional(&self.db)
        .await?;

        Ok(identity)
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = now(), access_token = NULL, refresh_token = NULL, \
             updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
