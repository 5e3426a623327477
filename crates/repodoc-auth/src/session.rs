//! Stateless session tokens.
//!
//! A session token is a signed assertion binding to exactly one user-record
//! identifier. Verification is purely cryptographic: no server-side session
//! table exists. Every token carries a mandatory expiry claim.

use std::time::Duration;

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Claims carried by a session token.
///
/// Deliberately minimal: the subject is the user-record identifier and
/// nothing else is asserted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User-record identifier.
    pub sub: String,
    /// Issued-at, seconds since the epoch.
    pub iat: u64,
    /// Expiry, seconds since the epoch.
    pub exp: u64,
}

/// Mint a session token for a user record.
pub fn mint_session_token(secret: &str, user_id: &str, ttl: Duration) -> Result<String> {
    let now = chrono::Utc::now().timestamp() as u64;
    let claims = SessionClaims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + ttl.as_secs(),
    };

    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Verify a session token and return its claims.
///
/// Fails on a bad signature, a malformed token, or a passed expiry. The
/// embedded subject still has to be resolved against the user store by the
/// caller before the session counts as valid.
pub fn verify_session_token(secret: &str, token: &str) -> Result<SessionClaims> {
    let data = jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
