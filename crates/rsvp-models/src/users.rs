//! Identity records and user-management DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Closed set of roles an identity can hold. New identities start as `Guest`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    Guest,
    Invitee,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "GUEST",
            Role::Invitee => "INVITEE",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GUEST" => Ok(Role::Guest),
            "INVITEE" => Ok(Role::Invitee),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("Invalid role: {other}")),
        }
    }
}

/// A stored identity, as read from the `users` table.
///
/// Holds the password hash and the current token pair, so it is never
/// serialized to clients; use [`UserResponse`] for that.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: Role,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Identity {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Fields supplied when creating an identity.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Public view of an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&Identity> for UserResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            role: identity.role,
            created_at: identity.created_at,
        }
    }
}

/// Rejects values that are empty once surrounding whitespace is trimmed.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Self-service profile update. Role is deliberately absent.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(custom(function = "not_blank", message = "firstName must not be empty"))]
    pub first_name: Option<String>,
    #[validate(custom(function = "not_blank", message = "lastName must not be empty"))]
    pub last_name: Option<String>,
}

/// Privileged role change, admin only.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_defaults_to_guest() {
        assert_eq!(Role::default(), Role::Guest);
    }

    #[test]
    fn test_role_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""ADMIN""#);
        let role: Role = serde_json::from_str(r#""INVITEE""#).unwrap();
        assert_eq!(role, Role::Invitee);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("GUEST".parse::<Role>().unwrap(), Role::Guest);
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_update_profile_rejects_empty_names() {
        let dto = UpdateProfileRequest {
            first_name: Some(String::new()),
            last_name: None,
        };
        assert!(dto.validate().is_err());
        assert!(UpdateProfileRequest::default().validate().is_ok());
    }

    #[test]
    fn test_update_profile_rejects_whitespace_names() {
        let dto = UpdateProfileRequest {
            first_name: Some("Ada".to_string()),
            last_name: Some(" \t ".to_string()),
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("last_name"));
        assert!(!errors.field_errors().contains_key("first_name"));
    }

    #[test]
    fn test_user_response_uses_camel_case() {
        let response = UserResponse {
            id: Uuid::nil(),
            email: "x@y.com".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            role: Role::Guest,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["firstName"], "A");
        assert_eq!(json["lastName"], "B");
        assert_eq!(json["role"], "GUEST");
    }
}
