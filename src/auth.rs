//! # Authentication
//!
//! Bearer token extraction and verification for GraphQL requests.
//!
//! ## Token Format
//!
//! **Phase 1** (current): tokens are opaque strings. Verification only
//! checks that a token is present and at least [`MIN_TOKEN_LEN`] bytes,
//! then maps every acceptable token to the fixed identity
//! [`MOCK_USER_ID`]. There is no signature, expiry, or claims check —
//! this is a placeholder, not a security boundary.
//!
//! **Phase 2** (future): signed tokens (JWT or similar) with issuer and
//! expiry verification. Only [`verify_token`] changes; the extraction
//! path and [`AuthenticatedUser`] stay the same.
//!
//! ## Failure Posture
//!
//! Verification failure never blocks a request. The `/graphql` handler
//! logs a warning and executes the operation unauthenticated; resolvers
//! are individually responsible for checking identity presence.

use axum::http::{header, HeaderMap};
use axum_extra::extract::CookieJar;
use thiserror::Error;

/// Minimum acceptable token length in bytes.
pub const MIN_TOKEN_LEN: usize = 10;

/// Fixed identity returned for every syntactically acceptable token.
pub const MOCK_USER_ID: &str = "user-123";

/// Token verification failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("empty token provided")]
    EmptyToken,
    #[error("token too short")]
    TooShort,
}

/// Identity of the authenticated caller, attached to the per-request
/// GraphQL data when verification succeeds. Resolvers read it via
/// `ctx.data_opt::<AuthenticatedUser>()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

/// Verify a bearer token and derive the caller identity.
///
/// Rejects empty and short tokens; accepts everything else with the
/// constant mock identity. See the module documentation for the phase-2
/// replacement.
pub fn verify_token(token: &str) -> Result<AuthenticatedUser, AuthError> {
    if token.is_empty() {
        return Err(AuthError::EmptyToken);
    }
    if token.len() < MIN_TOKEN_LEN {
        return Err(AuthError::TooShort);
    }
    Ok(AuthenticatedUser {
        user_id: MOCK_USER_ID.to_string(),
    })
}

/// Extract a bearer token from the request.
///
/// Precedence: `Authorization` header (with or without the `Bearer `
/// prefix), then the `token` query parameter, then the `auth_token`
/// cookie. Empty values are skipped.
pub fn bearer_token(
    headers: &HeaderMap,
    query_token: Option<&str>,
    jar: &CookieJar,
) -> Option<String> {
    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        let token = value.strip_prefix("Bearer ").unwrap_or(value);
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }

    if let Some(token) = query_token {
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }

    jar.get("auth_token")
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}
