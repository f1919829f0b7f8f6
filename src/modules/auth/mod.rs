//! Signup, login and token refresh. None of these routes require a token.

pub mod controller;
pub mod router;
pub mod service;
