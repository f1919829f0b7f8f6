use anyhow::anyhow;
use rsvp_auth::{TokenError, TokenService};
use rsvp_config::SignupConfig;
use rsvp_core::{AppError, PasswordHasher};
use rsvp_models::{
    Identity, LoginRequest, NewIdentity, RefreshTokenRequest, Role, SignupRequest, TokenResponse,
};
use subtle::ConstantTimeEq;
use tracing::{debug, error, info, instrument, warn};

use crate::state::AppState;
use crate::store::IdentityStore;

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const INVALID_INVITE_CODE: &str = "Invalid invite code";
pub const INVALID_REFRESH_TOKEN: &str = "Invalid or expired refresh token";
pub const DUPLICATE_EMAIL: &str = "An account with this email already exists";

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn secrets_match(presented: &str, expected: &str) -> bool {
    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}

pub struct AuthService<'a> {
    store: &'a dyn IdentityStore,
    hasher: &'a PasswordHasher,
    tokens: &'a TokenService,
    signup_config: &'a SignupConfig,
}

impl<'a> AuthService<'a> {
    pub fn new(
        store: &'a dyn IdentityStore,
        hasher: &'a PasswordHasher,
        tokens: &'a TokenService,
        signup_config: &'a SignupConfig,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
            signup_config,
        }
    }

    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(
            state.store.as_ref(),
            &state.hasher,
            &state.tokens,
            &state.signup_config,
        )
    }

    /// Creates a GUEST identity and signs it in.
    ///
    /// Checks run in a fixed order and the first failure wins: invite code
    /// (401), duplicate email (422), password policy (422). The invite code
    /// comes first so that callers without one learn nothing about which
    /// emails are registered.
    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn signup(&self, dto: SignupRequest) -> Result<TokenResponse, AppError> {
        let email = normalize_email(&dto.email);

        if !secrets_match(&dto.invite_code, &self.signup_config.invite_code) {
            warn!("Signup rejected: invalid invite code");
            return Err(AppError::unauthorized(INVALID_INVITE_CODE));
        }

        let existing = self
            .store
            .find_by_email(&email)
            .await
            .map_err(AppError::database)?;
        if existing.is_some() {
            info!("Signup rejected: email already registered");
            return Err(AppError::conflict(DUPLICATE_EMAIL));
        }

        self.signup_config
            .password_policy
            .check(&dto.password)
            .map_err(|msg| AppError::unprocessable(anyhow!(msg)))?;

        let password_hash = self.hash_password(dto.password).await?;

        let identity = self
            .store
            .create(NewIdentity {
                email,
                password_hash,
                first_name: dto.first_name.trim().to_string(),
                last_name: dto.last_name.trim().to_string(),
                role: Role::default(),
            })
            .await
            .map_err(|e| {
                if e.is_conflict() {
                    info!("Signup lost a race for the same email");
                    AppError::conflict(DUPLICATE_EMAIL)
                } else {
                    AppError::database(e)
                }
            })?;

        info!(user_id = %identity.id, "Identity created");
        self.issue_and_persist(&identity).await
    }

    /// Unknown email, missing credential and wrong password all produce the
    /// same 401 after one bcrypt verification.
    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn login(&self, dto: LoginRequest) -> Result<TokenResponse, AppError> {
        let email = normalize_email(&dto.email);

        let found = self
            .store
            .find_by_email(&email)
            .await
            .map_err(AppError::database)?
            .and_then(|identity| {
                let hash = identity.password_hash.clone()?;
                Some((identity, hash))
            });

        let Some((identity, password_hash)) = found else {
            self.burn_verification(dto.password).await?;
            warn!("Login failed: no matching identity");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !self.verify_password(password_hash, dto.password).await? {
            warn!(user_id = %identity.id, "Login failed: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        info!(user_id = %identity.id, "Login succeeded");
        self.issue_and_persist(&identity).await
    }

    /// Exchanges the current refresh token for a new pair. A refresh token
    /// that has been superseded by a later login or refresh is rejected.
    #[instrument(skip_all)]
    pub async fn refresh(&self, dto: RefreshTokenRequest) -> Result<TokenResponse, AppError> {
        let reject = || AppError::unauthorized(INVALID_REFRESH_TOKEN);

        let claims = self
            .tokens
            .validate_refresh(&dto.refresh_token)
            .map_err(|e| {
                debug!(reason = %e, "Rejected refresh token");
                reject()
            })?;
        let subject_id = claims.subject_id().map_err(|_| reject())?;

        let identity = self
            .store
            .find_by_id(subject_id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(reject)?;

        let is_current = identity
            .refresh_token
            .as_deref()
            .is_some_and(|stored| secrets_match(&dto.refresh_token, stored));
        if !is_current {
            warn!(user_id = %identity.id, "Refresh token is not the current one");
            return Err(reject());
        }

        info!(user_id = %identity.id, "Token pair refreshed");
        self.issue_and_persist(&identity).await
    }

    async fn issue_and_persist(&self, identity: &Identity) -> Result<TokenResponse, AppError> {
        let pair = self
            .tokens
            .issue(identity)
            .map_err(TokenError::into_app_error)?;

        let stored = self
            .store
            .update_tokens(identity.id, &pair.access_token, &pair.refresh_token)
            .await
            .map_err(AppError::database)?;
        if !stored {
            return Err(AppError::internal_error(format!(
                "identity {} disappeared before its tokens were stored",
                identity.id
            )));
        }

        Ok(TokenResponse {
            token: pair.access_token,
            refresh_token: pair.refresh_token,
        })
    }

    async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(AppError::internal)?
            .map_err(|e| {
                error!(error = %e, "Password hashing failed");
                AppError::internal(e)
            })
    }

    async fn verify_password(&self, hashed: String, candidate: String) -> Result<bool, AppError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&hashed, &candidate))
            .await
            .map_err(AppError::internal)
    }

    async fn burn_verification(&self, candidate: String) -> Result<(), AppError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify_dummy(&candidate))
            .await
            .map_err(AppError::internal)?;
        Ok(())
    }
}
