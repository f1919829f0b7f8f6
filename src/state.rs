use std::sync::Arc;

use rsvp_auth::TokenService;
use rsvp_config::{CorsConfig, JwtConfig, ServerConfig, SignupConfig};
use rsvp_core::PasswordHasher;

use crate::store::{IdentityStore, PgIdentityStore};

/// Shared, read-only state handed to every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn IdentityStore>,
    pub tokens: TokenService,
    pub hasher: PasswordHasher,
    pub signup_config: SignupConfig,
    pub cors_config: CorsConfig,
    pub server_config: ServerConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("hasher_cost", &self.hasher.cost())
            .field("server_config", &self.server_config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// # Panics
    ///
    /// Panics if the configured bcrypt cost is unusable: the server must not
    /// start with a hasher it cannot run.
    pub fn new(
        store: Arc<dyn IdentityStore>,
        jwt_config: &JwtConfig,
        signup_config: SignupConfig,
        cors_config: CorsConfig,
        server_config: ServerConfig,
    ) -> Self {
        let hasher = PasswordHasher::new(signup_config.hash_cost)
            .unwrap_or_else(|e| panic!("Failed to initialise password hasher: {e}"));

        Self {
            store,
            tokens: TokenService::new(jwt_config),
            hasher,
            signup_config,
            cors_config,
            server_config,
        }
    }
}

/// Builds the state from the environment and connects to PostgreSQL.
///
/// # Panics
///
/// Panics if `JWT_SECRET`, `INVITE_CODE` or `DATABASE_URL` is missing, or the
/// database is unreachable.
pub async fn init_app_state() -> AppState {
    let jwt_config = JwtConfig::from_env();
    let signup_config = SignupConfig::from_env();
    let db = rsvp_db::init_db_pool().await;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run database migrations");

    AppState::new(
        Arc::new(PgIdentityStore::new(db)),
        &jwt_config,
        signup_config,
        CorsConfig::from_env(),
        ServerConfig::from_env(),
    )
}
