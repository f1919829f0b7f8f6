//! # rsvp Auth
//!
//! Token service for the rsvp API.
//!
//! - [`claims`]: JWT claim structures for access and refresh tokens
//! - [`jwt`]: [`TokenService`], which issues token pairs and validates them
//!   with a typed [`TokenError`]
//!
//! # Token Types
//!
//! - **Access Token** ([`Claims`]): 24-hour token carrying email, names, role
//!   and subject id
//! - **Refresh Token** ([`RefreshTokenClaims`]): 7-day token carrying only the
//!   subject, exchanged for a new access token

pub mod claims;
pub mod jwt;

pub use claims::{Claims, RefreshTokenClaims};
pub use jwt::{TokenError, TokenPair, TokenService};
