//! Keycloak token endpoint client
//!
//! Performs the OAuth2 credential exchange against a realm's OpenID Connect
//! token endpoint and provides the PKCE helpers used by the interactive
//! browser flow. Nothing here holds state: every call takes the base URL,
//! realm and credentials it needs and returns the decoded token response.
//!
//! Grant types:
//! - `password` (admin user + client id, optional secret / TOTP / offline scope)
//! - `client_credentials` (confidential client with a service account)
//! - `refresh_token`
//! - `authorization_code` with PKCE (completion of a browser login)

pub mod constants;
pub mod credentials;
pub mod error;
pub mod pkce;
pub mod token;

pub use constants::*;
pub use credentials::{Credentials, GrantType};
pub use error::{Error, Result};
pub use pkce::{AuthorizationRequest, build_authorization_url, compute_challenge, generate_verifier};
pub use token::{TokenPair, TokenResponse, acquire_token, exchange_code};
