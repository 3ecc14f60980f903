//! Unverified JWT claim decoding
//!
//! Only used to learn when a token expires. Signature verification is the
//! server's job; the admin API rejects forged tokens.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenClaims {
    /// Expiry, unix seconds
    pub exp: Option<i64>,
    /// Issued at, unix seconds
    pub iat: Option<i64>,
    pub sub: Option<String>,
    pub preferred_username: Option<String>,
    pub nonce: Option<String>,
}

/// Decode the payload segment of a compact JWT.
pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| Error::InvalidToken("not a JWT (missing payload segment)".into()))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| Error::InvalidToken(format!("payload is not base64url: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| Error::InvalidToken(format!("payload is not a claims object: {e}")))
}
