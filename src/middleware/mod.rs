//! Request guards for protected routes.
//!
//! - [`auth`]: bearer-token authentication and the [`CurrentIdentity`](auth::CurrentIdentity) extractor
//! - [`role`]: role and ownership checks, run after authentication
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::authenticate`] verifies the token and reloads the identity
//! 3. A role guard, if any, checks the caller's current role
//! 4. The handler runs with a [`CurrentIdentity`](auth::CurrentIdentity) in scope

pub mod auth;
pub mod role;
