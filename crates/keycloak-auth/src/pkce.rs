//! PKCE (Proof Key for Code Exchange) per RFC 7636 and the login URL
//!
//! The verifier stays with the client until the authorization code comes
//! back; the S256 challenge goes into the authorization URL so Keycloak can
//! check that the code exchange comes from the party that started the login.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngExt;
use sha2::{Digest, Sha256};

use crate::constants::authorization_endpoint;
use crate::error::Result;

/// Generate a random PKCE code verifier.
///
/// 64 random bytes encode to 86 URL-safe base64 characters, inside the
/// 43-128 character range RFC 7636 (and Keycloak) accept.
pub fn generate_verifier() -> String {
    let mut bytes = [0u8; 64];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// `challenge = BASE64URL(SHA256(verifier))`
pub fn compute_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Parameters of a browser login request.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest<'a> {
    pub client_id: &'a str,
    pub redirect_uri: &'a str,
    /// Opaque CSRF value echoed back on the callback
    pub state: &'a str,
    pub nonce: &'a str,
    pub scope: &'a str,
    pub code_challenge: &'a str,
}

/// Build the realm's authorization URL for a code + PKCE login.
///
/// The response is delivered in the URL fragment, as the Keycloak browser
/// adapter does.
pub fn build_authorization_url(
    base_url: &str,
    realm: &str,
    request: &AuthorizationRequest<'_>,
) -> Result<String> {
    let mut url = authorization_endpoint(base_url, realm)?;
    url.query_pairs_mut()
        .append_pair("client_id", request.client_id)
        .append_pair("redirect_uri", request.redirect_uri)
        .append_pair("state", request.state)
        .append_pair("nonce", request.nonce)
        .append_pair("response_mode", "fragment")
        .append_pair("response_type", "code")
        .append_pair("scope", request.scope)
        .append_pair("code_challenge", request.code_challenge)
        .append_pair("code_challenge_method", "S256");
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn verifier_length_within_rfc_range() {
        let verifier = generate_verifier();
        assert_eq!(verifier.len(), 86);
        assert!(
            verifier
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "verifier must be URL-safe base64 (no padding): {verifier}"
        );
    }

    #[test]
    fn verifiers_are_unique() {
        assert_ne!(generate_verifier(), generate_verifier());
    }

    #[test]
    fn challenge_matches_known_value() {
        // SHA256("hello") = 2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824
        assert_eq!(
            compute_challenge("hello"),
            "LPJNul-wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ"
        );
    }

    #[test]
    fn authorization_url_contains_required_params() {
        let challenge = compute_challenge("test-verifier");
        let url = build_authorization_url(
            "http://127.0.0.1:8080/auth",
            "demo",
            &AuthorizationRequest {
                client_id: "admin-console",
                redirect_uri: "http://localhost:3000/callback",
                state: "state-123",
                nonce: "nonce-456",
                scope: "openid",
                code_challenge: &challenge,
            },
        )
        .unwrap();

        assert!(url.starts_with(
            "http://127.0.0.1:8080/auth/realms/demo/protocol/openid-connect/auth?"
        ));
        assert!(url.contains("client_id=admin-console"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fcallback"));
        assert!(url.contains("state=state-123"));
        assert!(url.contains("nonce=nonce-456"));
        assert!(url.contains("response_mode=fragment"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains(&format!("code_challenge={challenge}")));
        assert!(url.contains("code_challenge_method=S256"));
    }

    #[test]
    fn unparseable_base_url_is_rejected() {
        let result = build_authorization_url(
            "not a url",
            "demo",
            &AuthorizationRequest {
                client_id: "c",
                redirect_uri: "r",
                state: "s",
                nonce: "n",
                scope: "openid",
                code_challenge: "x",
            },
        );
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
