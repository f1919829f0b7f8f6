use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use rsvp_core::AppError;
use rsvp_models::{UpdateProfileRequest, UpdateRoleRequest, UserResponse};
use tracing::instrument;
use uuid::Uuid;

use super::service::UserService;
use crate::docs::ErrorResponse;
use crate::middleware::auth::CurrentIdentity;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all, fields(user_id = %identity.id))]
pub async fn get_me(
    State(state): State<AppState>,
    identity: CurrentIdentity,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::from_state(&state).get_user(identity.id).await?;
    Ok(Json(user))
}

/// Get a user by id (self or admin)
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 401, description = "Not authenticated, or neither the owner nor an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all, fields(target_id = %id))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::from_state(&state).get_user(id).await?;
    Ok(Json(user))
}

/// Update a user's first and last name (self or admin)
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User id")
    ),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Not authenticated, or neither the owner nor an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all, fields(target_id = %id))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::from_state(&state).update_profile(id, dto).await?;
    Ok(Json(user))
}

/// List all live users (admin)
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List of users", body = Vec<UserResponse>),
        (status = 401, description = "Not authenticated or not an admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = UserService::from_state(&state).get_users().await?;
    Ok(Json(users))
}

/// Change a user's role (admin)
#[utoipa::path(
    put,
    path = "/api/users/{id}/role",
    params(
        ("id" = Uuid, Path, description = "User id")
    ),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Unknown role", body = ErrorResponse),
        (status = 401, description = "Not authenticated or not an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all, fields(target_id = %id))]
pub async fn update_user_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateRoleRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::from_state(&state).update_role(id, dto.role).await?;
    Ok(Json(user))
}

/// Soft-delete a user (admin)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User id")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Not authenticated or not an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all, fields(target_id = %id))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    UserService::from_state(&state).delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
