//! Signed, expiring access and refresh tokens.
//!
//! [`TokenService`] is built once from [`JwtConfig`] and shared read-only by
//! every request. Tokens are HS256 JWTs; timestamps are Unix seconds, which
//! are the same instant whatever timezone the issuing or validating clock
//! reports in.
//!
//! Validation checks the signature before anything else and only then
//! compares `exp` with the current time, so a forged token is always reported
//! as [`TokenError::Malformed`], never as expired.
//!
//! # Example
//!
//! ```ignore
//! use rsvp_auth::TokenService;
//! use rsvp_config::JwtConfig;
//!
//! let tokens = TokenService::new(&JwtConfig::from_env());
//! let pair = tokens.issue(&identity)?;
//! let claims = tokens.validate_access(&pair.access_token)?;
//! ```

use std::collections::HashSet;

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode,
};
use rsvp_config::JwtConfig;
use rsvp_core::AppError;
use rsvp_models::Identity;
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use crate::claims::{Claims, RefreshTokenClaims};

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Why a token was not accepted.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Not a JWT, or its signature does not verify.
    #[error("token is malformed or its signature does not verify")]
    Malformed,
    /// Signature verifies but `exp` has passed.
    #[error("token has expired")]
    Expired,
    /// Signature verifies but the payload lacks required claims.
    #[error("token claims are missing or invalid")]
    InvalidClaims,
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl TokenError {
    /// Client-facing error: 401 for anything the caller sent, 500 for signing.
    ///
    /// Expired tokens get their own message so clients know to refresh.
    pub fn into_app_error(self) -> AppError {
        match self {
            TokenError::Expired => AppError::unauthorized("Token has expired"),
            TokenError::Malformed | TokenError::InvalidClaims => {
                AppError::unauthorized("Invalid token")
            }
            TokenError::Signing(e) => AppError::internal(e),
        }
    }
}

/// Access and refresh token issued together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// # Panics
    ///
    /// Panics if the configured secret is empty. Signing with an empty key
    /// would mint tokens anyone can forge.
    pub fn new(config: &JwtConfig) -> Self {
        assert!(
            !config.secret.trim().is_empty(),
            "JWT signing secret must not be empty"
        );
        let secret = config.secret.as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            access_ttl: Duration::seconds(config.access_token_expiry),
            refresh_ttl: Duration::seconds(config.refresh_token_expiry),
        }
    }

    pub fn issue(&self, identity: &Identity) -> Result<TokenPair, TokenError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issues a pair as if the current time were `now`.
    pub fn issue_at<Tz: TimeZone>(
        &self,
        identity: &Identity,
        now: DateTime<Tz>,
    ) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue_access_at(identity, now.clone())?,
            refresh_token: self.issue_refresh_at(identity.id, now)?,
        })
    }

    /// Mints a fresh access token, e.g. after a refresh token was exchanged.
    pub fn issue_access(&self, identity: &Identity) -> Result<String, TokenError> {
        self.issue_access_at(identity, Utc::now())
    }

    fn issue_access_at<Tz: TimeZone>(
        &self,
        identity: &Identity,
        now: DateTime<Tz>,
    ) -> Result<String, TokenError> {
        let iat = now.timestamp();
        let claims = Claims {
            sub: identity.id.to_string(),
            email: identity.email.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            role: identity.role,
            exp: iat + self.access_ttl.num_seconds(),
            iat,
        };
        self.sign(&claims)
    }

    fn issue_refresh_at<Tz: TimeZone>(
        &self,
        subject_id: Uuid,
        now: DateTime<Tz>,
    ) -> Result<String, TokenError> {
        let iat = now.timestamp();
        let claims = RefreshTokenClaims {
            sub: subject_id.to_string(),
            exp: iat + self.refresh_ttl.num_seconds(),
            iat,
            jti: Uuid::new_v4().to_string(),
        };
        self.sign(&claims)
    }

    fn sign<T: serde::Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        encode(&Header::new(ALGORITHM), claims, &self.encoding_key).map_err(TokenError::Signing)
    }

    pub fn validate_access(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_access_at(token, Utc::now())
    }

    pub fn validate_access_at<Tz: TimeZone>(
        &self,
        token: &str,
        now: DateTime<Tz>,
    ) -> Result<Claims, TokenError> {
        let claims: Claims = self.verify(token)?;
        check_expiry(claims.exp, now)?;
        claims.subject_id()?;
        Ok(claims)
    }

    pub fn validate_refresh(&self, token: &str) -> Result<RefreshTokenClaims, TokenError> {
        self.validate_refresh_at(token, Utc::now())
    }

    pub fn validate_refresh_at<Tz: TimeZone>(
        &self,
        token: &str,
        now: DateTime<Tz>,
    ) -> Result<RefreshTokenClaims, TokenError> {
        let claims: RefreshTokenClaims = self.verify(token)?;
        check_expiry(claims.exp, now)?;
        claims.subject_id()?;
        Ok(claims)
    }

    /// Verifies the signature and decodes the payload without looking at `exp`.
    fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        // Header problems surface before the signature is checked; they are
        // malformed input, not bad claims.
        decode_header(token).map_err(|_| TokenError::Malformed)?;

        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::from(["exp".to_string(), "sub".to_string()]);

        decode::<T>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
                    TokenError::InvalidClaims
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })
    }
}

fn check_expiry<Tz: TimeZone>(exp: i64, now: DateTime<Tz>) -> Result<(), TokenError> {
    if now.timestamp() >= exp {
        return Err(TokenError::Expired);
    }
    Ok(())
}
