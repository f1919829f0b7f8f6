//! JWT claim structures.
//!
//! - [`Claims`]: access token claims carrying the identity's profile and role
//! - [`RefreshTokenClaims`]: refresh token claims, subject only

use rsvp_models::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::jwt::TokenError;

/// Claims embedded in access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Identity id (subject claim)
    pub sub: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    /// Expiry, Unix seconds
    pub exp: i64,
    /// Issued-at, Unix seconds
    pub iat: i64,
}

impl Claims {
    pub fn subject_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::InvalidClaims)
    }
}

/// Claims embedded in refresh tokens.
///
/// Only the subject is carried; everything else is reloaded from storage when
/// the token is exchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    /// Unique token id, so two refresh tokens minted in the same second differ
    pub jti: String,
}

impl RefreshTokenClaims {
    pub fn subject_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::InvalidClaims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize_camel_case() {
        let claims = Claims {
            sub: "user-id-123".to_string(),
            email: "test@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: Role::Invitee,
            exp: 1234567890,
            iat: 1234567800,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""sub":"user-id-123""#));
        assert!(serialized.contains(r#""firstName":"Ada""#));
        assert!(serialized.contains(r#""role":"INVITEE""#));
    }

    #[test]
    fn test_subject_id_rejects_non_uuid() {
        let claims = RefreshTokenClaims {
            sub: "not-a-uuid".to_string(),
            exp: 0,
            iat: 0,
            jti: "jti".to_string(),
        };
        assert!(matches!(claims.subject_id(), Err(TokenError::InvalidClaims)));
    }

    #[test]
    fn test_subject_id_parses_uuid() {
        let id = Uuid::new_v4();
        let claims = RefreshTokenClaims {
            sub: id.to_string(),
            exp: 0,
            iat: 0,
            jti: "jti".to_string(),
        };
        assert_eq!(claims.subject_id().unwrap(), id);
    }
}
