use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use rsvp_core::AppError;
use rsvp_models::{LoginRequest, RefreshTokenRequest, SignupRequest, TokenResponse};
use tracing::instrument;

use super::service::AuthService;
use crate::docs::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create an account with the shared invite code
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created and signed in", body = TokenResponse),
        (status = 400, description = "Malformed or incomplete request body", body = ErrorResponse),
        (status = 401, description = "Invalid invite code", body = ErrorResponse),
        (status = 422, description = "Email already registered or password too weak", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    let response = AuthService::from_state(&state).signup(dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 202, description = "Signed in", body = TokenResponse),
        (status = 400, description = "Malformed or incomplete request body", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    let response = AuthService::from_state(&state).login(dto).await?;
    Ok((StatusCode::ACCEPTED, Json(response)))
}

/// Exchange the current refresh token for a new token pair
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New token pair", body = TokenResponse),
        (status = 400, description = "Malformed or incomplete request body", body = ErrorResponse),
        (status = 401, description = "Invalid, expired or superseded refresh token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RefreshTokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let response = AuthService::from_state(&state).refresh(dto).await?;
    Ok(Json(response))
}
