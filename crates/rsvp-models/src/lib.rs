//! # rsvp Models
//!
//! Data structures shared across the rsvp API: the stored [`Identity`], the
//! [`Role`] enumeration, and the request/response bodies of the auth and user
//! endpoints.
//!
//! - [`auth`]: signup, login and refresh payloads, token responses
//! - [`users`]: identity records, roles, profile and role updates

pub mod auth;
pub mod users;

pub use auth::{LoginRequest, RefreshTokenRequest, SignupRequest, TokenResponse};
pub use users::{
    Identity, NewIdentity, Role, UpdateProfileRequest, UpdateRoleRequest, UserResponse,
};
