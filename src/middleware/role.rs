//! Authorization guards layered after [`authenticate`](super::auth::authenticate).
//!
//! - [`require_admin`] / [`require_roles`]: the caller's role must be one of
//!   the allowed roles
//! - [`require_self_or_admin`]: admins pass outright; anyone else must be
//!   acting on their own record, identified by the `{id}` path parameter
//!
//! The `check_*` functions hold the decisions and can be called from handler
//! code directly. Failures are 401 with a generic message.
//!
//! ```rust,ignore
//! Router::new().route(
//!     "/",
//!     get(get_users).route_layer(middleware::from_fn(require_admin)),
//! )
//! ```

use axum::{
    extract::{Path, Request},
    middleware::Next,
    response::Response,
};
use rsvp_core::AppError;
use rsvp_models::Role;
use tracing::warn;
use uuid::Uuid;

use crate::middleware::auth::CurrentIdentity;

const ACCESS_DENIED: &str = "Access denied";

pub fn check_role(identity: &CurrentIdentity, required_role: Role) -> Result<(), AppError> {
    check_any_role(identity, &[required_role])
}

pub fn check_any_role(identity: &CurrentIdentity, allowed_roles: &[Role]) -> Result<(), AppError> {
    if !allowed_roles.contains(&identity.role) {
        warn!(
            user_id = %identity.id,
            role = %identity.role,
            required = ?allowed_roles,
            "Role check failed"
        );
        return Err(AppError::unauthorized(ACCESS_DENIED));
    }

    Ok(())
}

/// Admins always pass; everyone else only for their own id.
pub fn check_self_or_admin(identity: &CurrentIdentity, target_id: Uuid) -> Result<(), AppError> {
    if identity.is_admin() {
        return Ok(());
    }

    if identity.id != target_id {
        warn!(
            user_id = %identity.id,
            target_id = %target_id,
            "Ownership check failed"
        );
        return Err(AppError::unauthorized(ACCESS_DENIED));
    }

    Ok(())
}

pub async fn require_roles(
    identity: CurrentIdentity,
    req: Request,
    next: Next,
    allowed_roles: &[Role],
) -> Result<Response, AppError> {
    check_any_role(&identity, allowed_roles)?;
    Ok(next.run(req).await)
}

pub async fn require_admin(
    identity: CurrentIdentity,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(identity, req, next, &[Role::Admin]).await
}

pub async fn require_self_or_admin(
    identity: CurrentIdentity,
    Path(target_id): Path<Uuid>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    check_self_or_admin(&identity, target_id)?;
    Ok(next.run(req).await)
}
