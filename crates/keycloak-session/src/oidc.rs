//! OpenID Connect browser-flow session (authorization code + PKCE)
//!
//! Native counterpart of the Keycloak JavaScript adapter. The application
//! does the redirecting: `trigger_login` hands it a `LoginRequest`, and the
//! parameters that come back on the redirect URI are fed to `init` (as
//! `InitOptions::callback`) or to `complete_login`.
//!
//! Token expiry is read from the access token's `exp` claim, corrected by the
//! clock skew observed when the token was adopted (`now - iat`).

use std::collections::HashMap;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use keycloak_auth::{AuthorizationRequest, Credentials, TokenResponse};
use request_config::RequestConfig;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::claims::decode_claims;
use crate::error::{Error, Result};
use crate::interactive::{
    BoxFuture, CallbackParams, InitOptions, InteractiveConfig, InteractiveSession, LoginRedirect,
    LoginRequest, OnLoad,
};

/// Redirect URI for installed applications without a web listener.
pub const OUT_OF_BAND_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Maximum age of a pending login before its verifier is discarded.
const PENDING_LOGIN_EXPIRY: Duration = Duration::from_secs(600);

/// Tokens currently held by the session.
#[derive(Default)]
struct TokenState {
    token: Option<String>,
    refresh_token: Option<String>,
    id_token: Option<String>,
    expires_at: Option<i64>,
    time_skew: i64,
}

/// A login started by `trigger_login` and not yet completed.
struct PendingLogin {
    verifier: String,
    nonce: String,
    redirect_uri: String,
    created_at: Instant,
}

/// Settings captured from `InitOptions` for later logins and exchanges.
#[derive(Clone, Default)]
struct LoginSettings {
    redirect_uri: Option<String>,
    scope: Option<String>,
    login_redirect: Option<LoginRedirect>,
    timeout: Option<Duration>,
}

pub struct OidcSession {
    auth_server_url: String,
    realm: String,
    client_id: String,
    http: reqwest::Client,
    tokens: RwLock<TokenState>,
    pending: Mutex<HashMap<String, PendingLogin>>,
    settings: RwLock<LoginSettings>,
}

impl OidcSession {
    /// Build a session from `config`, falling back to `fallback_url` when the
    /// config names no server.
    pub fn new(config: &InteractiveConfig, fallback_url: &str, http: reqwest::Client) -> Result<Self> {
        let url = config
            .url
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(fallback_url)
            .trim_end_matches('/')
            .to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::Initialization(format!(
                "auth server url must start with http:// or https://, got: {url}"
            )));
        }
        if config.realm.trim().is_empty() {
            return Err(Error::Initialization("realm must not be empty".into()));
        }
        if config.client_id.trim().is_empty() {
            return Err(Error::Initialization("client_id must not be empty".into()));
        }
        Ok(Self {
            auth_server_url: url,
            realm: config.realm.clone(),
            client_id: config.client_id.clone(),
            http,
            tokens: RwLock::new(TokenState::default()),
            pending: Mutex::new(HashMap::new()),
            settings: RwLock::new(LoginSettings::default()),
        })
    }

    pub async fn is_authenticated(&self) -> bool {
        self.tokens.read().await.token.is_some()
    }

    pub async fn id_token(&self) -> Option<String> {
        self.tokens.read().await.id_token.clone()
    }

    /// Complete a login from its redirect parameters.
    pub async fn complete_login(&self, callback: &CallbackParams) -> Result<()> {
        if let Some(error) = &callback.error {
            return Err(Error::Initialization(format!("login failed: {error}")));
        }
        let code = callback
            .code
            .as_deref()
            .ok_or_else(|| Error::Initialization("callback carries no code".into()))?;

        let pending = {
            let mut pending = self.pending.lock().await;
            pending.retain(|_, p| p.created_at.elapsed() < PENDING_LOGIN_EXPIRY);
            pending.remove(&callback.state)
        };
        let settings = self.settings.read().await.clone();
        // A login this session issued keeps its nonce and redirect_uri even
        // when the caller supplies the verifier.
        let (verifier, nonce, redirect_uri) = match (pending, &callback.code_verifier) {
            (Some(p), supplied) => (
                supplied.clone().unwrap_or(p.verifier),
                Some(p.nonce),
                p.redirect_uri,
            ),
            (None, Some(verifier)) => (
                verifier.clone(),
                None,
                settings
                    .redirect_uri
                    .clone()
                    .unwrap_or_else(|| OUT_OF_BAND_REDIRECT_URI.to_string()),
            ),
            (None, None) => {
                return Err(Error::Initialization(format!(
                    "no pending login for state {}",
                    callback.state
                )));
            }
        };

        let overrides = settings
            .timeout
            .map(|t| RequestConfig::new().with_timeout(t));
        let response = keycloak_auth::exchange_code(
            &self.http,
            &self.auth_server_url,
            &self.realm,
            &self.client_id,
            code,
            &verifier,
            &redirect_uri,
            overrides.as_ref(),
        )
        .await
        .map_err(|e| Error::Initialization(format!("code exchange failed: {e}")))?;

        if let (Some(expected), Some(id_token)) = (nonce, &response.id_token) {
            let claims = decode_claims(id_token)
                .map_err(|e| Error::Initialization(format!("id token: {e}")))?;
            if claims.nonce.as_deref() != Some(expected.as_str()) {
                return Err(Error::Initialization("id token nonce mismatch".into()));
            }
        }

        self.adopt_response(&response).await?;
        info!(realm = %self.realm, client_id = %self.client_id, "interactive login completed");
        Ok(())
    }

    async fn adopt_response(&self, response: &TokenResponse) -> Result<()> {
        self.adopt(
            response.access_token.clone(),
            response.refresh_token.clone(),
            response.id_token.clone(),
        )
        .await
    }

    /// Replace the held tokens. The access token must be a JWT with `exp`.
    async fn adopt(
        &self,
        token: String,
        refresh_token: Option<String>,
        id_token: Option<String>,
    ) -> Result<()> {
        let claims = decode_claims(&token)?;
        let exp = claims
            .exp
            .ok_or_else(|| Error::InvalidToken("access token carries no exp claim".into()))?;
        let now = unix_now();
        let mut state = self.tokens.write().await;
        state.expires_at = Some(exp);
        state.time_skew = claims.iat.map(|iat| now - iat).unwrap_or(0);
        state.token = Some(token);
        state.refresh_token = refresh_token;
        state.id_token = id_token;
        debug!(expires_at = ?state.expires_at, time_skew = state.time_skew, "tokens adopted");
        Ok(())
    }

    async fn start_login(&self) -> Result<()> {
        let settings = self.settings.read().await.clone();
        let redirect_uri = settings
            .redirect_uri
            .clone()
            .unwrap_or_else(|| OUT_OF_BAND_REDIRECT_URI.to_string());
        let scope = match settings.scope.as_deref() {
            Some(extra) if extra.split(' ').any(|s| s == "openid") => extra.to_string(),
            Some(extra) if !extra.trim().is_empty() => format!("openid {extra}"),
            _ => "openid".to_string(),
        };

        let state = Uuid::new_v4().to_string();
        let nonce = Uuid::new_v4().to_string();
        let verifier = keycloak_auth::generate_verifier();
        let challenge = keycloak_auth::compute_challenge(&verifier);
        let url = keycloak_auth::build_authorization_url(
            &self.auth_server_url,
            &self.realm,
            &AuthorizationRequest {
                client_id: &self.client_id,
                redirect_uri: &redirect_uri,
                state: &state,
                nonce: &nonce,
                scope: &scope,
                code_challenge: &challenge,
            },
        )
        .map_err(|e| Error::Login(e.to_string()))?;

        {
            let mut pending = self.pending.lock().await;
            pending.retain(|_, p| p.created_at.elapsed() < PENDING_LOGIN_EXPIRY);
            pending.insert(
                state.clone(),
                PendingLogin {
                    verifier: verifier.clone(),
                    nonce,
                    redirect_uri: redirect_uri.clone(),
                    created_at: Instant::now(),
                },
            );
        }

        let request = LoginRequest {
            url,
            state,
            code_verifier: verifier,
            redirect_uri,
        };
        match &settings.login_redirect {
            Some(redirect) => redirect(&request),
            None => info!(url = %request.url, "login required, open this URL in a browser"),
        }
        Ok(())
    }

    async fn refresh(&self, min_validity: Duration) -> Result<bool> {
        let refresh_token = {
            let state = self.tokens.read().await;
            if state.token.is_none() {
                return Err(Error::Refresh("not authenticated".into()));
            }
            let needs_refresh = match state.expires_at {
                Some(exp) => {
                    let remaining = exp - unix_now() + state.time_skew;
                    remaining < min_validity.as_secs() as i64
                }
                None => true,
            };
            if !needs_refresh {
                return Ok(false);
            }
            state
                .refresh_token
                .clone()
                .ok_or_else(|| Error::Refresh("token expiring and no refresh token held".into()))?
        };

        debug!(realm = %self.realm, "refreshing interactive session token");
        let timeout = self.settings.read().await.timeout;
        let overrides = timeout.map(|t| RequestConfig::new().with_timeout(t));
        let response = keycloak_auth::acquire_token(
            &self.http,
            &self.auth_server_url,
            &self.realm,
            &Credentials::refresh_token(self.client_id.clone(), refresh_token),
            overrides.as_ref(),
        )
        .await
        .map_err(|e| Error::Refresh(e.to_string()))?;

        self.adopt_response(&response).await?;
        Ok(true)
    }
}

impl InteractiveSession for OidcSession {
    fn init<'a>(&'a self, options: &'a InitOptions) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            *self.settings.write().await = LoginSettings {
                redirect_uri: options.redirect_uri.clone(),
                scope: options.scope.clone(),
                login_redirect: options.login_redirect.clone(),
                timeout: options.timeout,
            };

            if let Some(callback) = &options.callback {
                return self.complete_login(callback).await;
            }

            if let Some(token) = &options.token {
                return self
                    .adopt(
                        token.clone(),
                        options.refresh_token.clone(),
                        options.id_token.clone(),
                    )
                    .await
                    .map_err(|e| Error::Initialization(format!("supplied token rejected: {e}")));
            }

            match options.on_load {
                Some(OnLoad::LoginRequired) => self
                    .start_login()
                    .await
                    .map_err(|e| Error::Initialization(e.to_string())),
                Some(OnLoad::CheckSso) | None => {
                    debug!(realm = %self.realm, "no existing session, staying unauthenticated");
                    Ok(())
                }
            }
        })
    }

    fn refresh_if_needed(&self, min_validity: Duration) -> BoxFuture<'_, Result<bool>> {
        Box::pin(self.refresh(min_validity))
    }

    fn current_token(&self) -> BoxFuture<'_, Option<String>> {
        Box::pin(async move { self.tokens.read().await.token.clone() })
    }

    fn trigger_login(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            if let Err(e) = self.start_login().await {
                warn!(error = %e, "failed to start interactive login");
                return Err(e);
            }
            Ok(())
        })
    }

    fn auth_server_url(&self) -> &str {
        &self.auth_server_url
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
