//! Token endpoint exchange
//!
//! Every grant POSTs a form-encoded body to
//! `{base_url}/realms/{realm}/protocol/openid-connect/token`. Caller request
//! overrides are applied first, minus `Content-Type` and `Authorization`, so
//! the form encoding and client authentication always survive. No retries:
//! a failure goes straight back to the caller.

use common::Secret;
use request_config::RequestConfig;
use reqwest::Url;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::constants::token_endpoint;
use crate::credentials::{Credentials, GrantType};
use crate::error::{Error, Result};

/// Decoded token endpoint response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Absent for client-credentials grants on recent Keycloak versions
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Seconds until the access token expires (delta, not absolute)
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub session_state: Option<String>,
}

/// The part of a token response the admin client keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

impl TokenResponse {
    pub fn token_pair(&self) -> TokenPair {
        TokenPair {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }
}

/// Exchange credentials for tokens.
///
/// Credentials are validated before anything is sent; a validation failure
/// is `InvalidCredentials` and performs no request.
pub async fn acquire_token(
    client: &reqwest::Client,
    base_url: &str,
    realm: &str,
    credentials: &Credentials,
    overrides: Option<&RequestConfig>,
) -> Result<TokenResponse> {
    credentials.validate()?;
    let url = token_endpoint(base_url, realm)?;
    let basic_auth = credentials
        .client_secret()
        .map(|secret| (credentials.client_id(), secret));
    post_token_form(
        client,
        url,
        realm,
        credentials.grant_type(),
        &credentials.form_params(),
        basic_auth,
        overrides,
    )
    .await
}

/// Exchange an authorization code (browser login callback) for tokens.
///
/// `verifier` is the PKCE verifier whose challenge was sent with the login.
#[allow(clippy::too_many_arguments)]
pub async fn exchange_code(
    client: &reqwest::Client,
    base_url: &str,
    realm: &str,
    client_id: &str,
    code: &str,
    verifier: &str,
    redirect_uri: &str,
    overrides: Option<&RequestConfig>,
) -> Result<TokenResponse> {
    if code.is_empty() {
        return Err(Error::InvalidCredentials(
            "authorization_code grant requires a code".into(),
        ));
    }
    let params = [
        ("grant_type", GrantType::AuthorizationCode.as_str().to_string()),
        ("client_id", client_id.to_string()),
        ("code", code.to_string()),
        ("redirect_uri", redirect_uri.to_string()),
        ("code_verifier", verifier.to_string()),
    ];
    post_token_form(
        client,
        token_endpoint(base_url, realm)?,
        realm,
        GrantType::AuthorizationCode,
        &params,
        None,
        overrides,
    )
    .await
}

async fn post_token_form(
    client: &reqwest::Client,
    url: Url,
    realm: &str,
    grant_type: GrantType,
    params: &[(&'static str, String)],
    basic_auth: Option<(&str, &Secret<String>)>,
    overrides: Option<&RequestConfig>,
) -> Result<TokenResponse> {
    debug!(realm, grant_type = grant_type.as_str(), "requesting token");

    let mut builder = client.post(url.clone());
    if let Some(config) = overrides {
        builder = request_config::apply(builder, config, &[CONTENT_TYPE, AUTHORIZATION]);
    }
    if let Some((client_id, secret)) = basic_auth {
        builder = builder.basic_auth(client_id, Some(secret.expose()));
    }

    let response = builder
        .form(params)
        .send()
        .await
        .map_err(|e| Error::Transport(format!("POST {url}: {e}")))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Error::Transport(format!("reading token response: {e}")))?;

    if !status.is_success() {
        warn!(
            realm,
            grant_type = grant_type.as_str(),
            status = status.as_u16(),
            "token endpoint rejected request"
        );
        return Err(Error::Authentication {
            status: status.as_u16(),
            body,
        });
    }

    match serde_json::from_str::<TokenResponse>(&body) {
        Ok(token) => {
            info!(realm, grant_type = grant_type.as_str(), "token acquired");
            Ok(token)
        }
        Err(e) => {
            warn!(realm, error = %e, "token endpoint returned an unparseable body");
            Err(Error::Authentication {
                status: status.as_u16(),
                body,
            })
        }
    }
}
