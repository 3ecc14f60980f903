//! Keycloak connection defaults and endpoint paths

use reqwest::Url;

use crate::error::{Error, Result};

/// Base URL used when the caller does not configure one.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/auth";

/// Realm used when the caller does not configure one.
pub const DEFAULT_REALM: &str = "master";

/// Public client Keycloak provisions in every realm for admin tooling.
pub const ADMIN_CLI_CLIENT_ID: &str = "admin-cli";

/// Scope requested for offline (long-lived refresh) tokens.
pub const OFFLINE_ACCESS_SCOPE: &str = "offline_access";

/// Token endpoint for a realm. The realm is percent-encoded as one path
/// segment.
pub fn token_endpoint(base_url: &str, realm: &str) -> Result<Url> {
    realm_endpoint(base_url, realm, "token")
}

/// Browser authorization endpoint for a realm.
pub fn authorization_endpoint(base_url: &str, realm: &str) -> Result<Url> {
    realm_endpoint(base_url, realm, "auth")
}

/// `{base_url}/realms/{realm}/protocol/openid-connect/{endpoint}`
fn realm_endpoint(base_url: &str, realm: &str, endpoint: &str) -> Result<Url> {
    let mut url =
        Url::parse(base_url).map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| Error::InvalidUrl(format!("{base_url}: cannot be a base url")))?
        .pop_if_empty()
        .extend(["realms", realm, "protocol", "openid-connect", endpoint]);
    Ok(url)
}
