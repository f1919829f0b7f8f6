//! Authentication middleware.
//!
//! [`authenticate`] runs in front of every protected route. A request ends in
//! one of three ways:
//!
//! - no bearer token: 401
//! - a token that is malformed, expired or names no live identity: 401
//!   (a failing store lookup is a 500 instead)
//! - a valid token: the identity is reloaded from the store and attached to
//!   the request as a [`CurrentIdentity`], so role and profile changes apply
//!   without a new login

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use rsvp_auth::TokenError;
use rsvp_core::AppError;
use rsvp_models::{Identity, Role};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::state::AppState;

/// The authenticated caller, as loaded from storage for this request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentIdentity {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl CurrentIdentity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&Identity> for CurrentIdentity {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            role: identity.role,
        }
    }
}

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentIdentity>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }
}

/// Extracts the token from `Authorization: Bearer <token>`. The scheme name
/// is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    auth_header
        .split_once(' ')
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))
}

pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())?;

    let claims = state.tokens.validate_access(token).map_err(|e| {
        debug!(reason = %e, "Rejected access token");
        e.into_app_error()
    })?;
    let subject_id = claims.subject_id().map_err(TokenError::into_app_error)?;

    let identity = state
        .store
        .find_by_id(subject_id)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| {
            warn!(user_id = %subject_id, "Token names an identity that no longer exists");
            AppError::unauthorized("Invalid token")
        })?;

    req.extensions_mut().insert(CurrentIdentity::from(&identity));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_bearer_scheme_ignores_case() {
        assert_eq!(bearer_token(&headers_with("bearer abc")).unwrap(), "abc");
        assert_eq!(bearer_token(&headers_with("BEARER abc")).unwrap(), "abc");
    }

    #[test]
    fn test_scheme_without_token_is_unauthorized() {
        assert!(bearer_token(&headers_with("Bearer")).is_err());
        assert!(bearer_token(&headers_with("Bearerabc")).is_err());
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let err = bearer_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_non_bearer_scheme_is_unauthorized() {
        let err = bearer_token(&headers_with("Basic dXNlcjpwYXNz")).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_empty_bearer_is_unauthorized() {
        let err = bearer_token(&headers_with("Bearer ")).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_is_admin() {
        let mut identity = CurrentIdentity {
            id: Uuid::new_v4(),
            email: "x@y.com".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            role: Role::Guest,
        };
        assert!(!identity.is_admin());
        identity.role = Role::Admin;
        assert!(identity.is_admin());
    }
}
