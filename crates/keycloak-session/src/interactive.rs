//! Interactive (browser redirect) authentication as an external collaborator
//!
//! The session state never drives browser redirects itself. It talks to an
//! `InteractiveSession` through five operations and defers token refresh and
//! login to it once attached.
//!
//! Uses `Pin<Box<dyn Future>>` return types for dyn-compatibility
//! (`Box<dyn InteractiveSession>`).

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A browser-flow session that owns its tokens.
pub trait InteractiveSession: Send + Sync {
    /// Run the initialization sequence: complete a pending callback, adopt
    /// supplied tokens, or start a login, depending on `options`.
    fn init<'a>(&'a self, options: &'a InitOptions) -> BoxFuture<'a, Result<()>>;

    /// Refresh the token if it expires within `min_validity`.
    ///
    /// Returns whether a refresh happened. Fails when there is no token to
    /// refresh or the refresh itself fails.
    fn refresh_if_needed(&self, min_validity: Duration) -> BoxFuture<'_, Result<bool>>;

    /// The token the session currently holds, possibly stale.
    fn current_token(&self) -> BoxFuture<'_, Option<String>>;

    /// Start a login. Completes once the redirect has been handed off, not
    /// when the user finishes logging in.
    fn trigger_login(&self) -> BoxFuture<'_, Result<()>>;

    /// The authoritative server URL of this session.
    fn auth_server_url(&self) -> &str;
}

/// Where the interactive session authenticates.
#[derive(Debug, Clone, Default)]
pub struct InteractiveConfig {
    /// Auth server URL. Falls back to the client's configured base URL.
    pub url: Option<String>,
    pub realm: String,
    pub client_id: String,
}

impl InteractiveConfig {
    pub fn new(realm: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            url: None,
            realm: realm.into(),
            client_id: client_id.into(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// What `init` does when no callback or token is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnLoad {
    /// Stay unauthenticated until a login is triggered
    CheckSso,
    /// Start a login immediately
    LoginRequired,
}

/// Parameters delivered to the redirect URI after a browser login.
#[derive(Debug, Clone, Default)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: String,
    /// `error` parameter set by the server when the login failed
    pub error: Option<String>,
    /// PKCE verifier persisted by the caller from the `LoginRequest`. When
    /// absent, the session looks up the verifier it issued for `state`.
    pub code_verifier: Option<String>,
}

/// A login handed to the application for redirecting the user.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub url: String,
    pub state: String,
    pub code_verifier: String,
    pub redirect_uri: String,
}

/// Receives login requests (opens a browser, prints the URL, ...).
pub type LoginRedirect = Arc<dyn Fn(&LoginRequest) + Send + Sync>;

/// Options for `init`.
#[derive(Clone, Default)]
pub struct InitOptions {
    pub on_load: Option<OnLoad>,
    /// Previously obtained access token to adopt
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub id_token: Option<String>,
    /// Redirect callback to complete during init
    pub callback: Option<CallbackParams>,
    pub redirect_uri: Option<String>,
    /// Extra scopes; `openid` is always requested
    pub scope: Option<String>,
    pub login_redirect: Option<LoginRedirect>,
    /// Maximum time to wait for the code exchange
    pub timeout: Option<Duration>,
}

impl InitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_load(mut self, on_load: OnLoad) -> Self {
        self.on_load = Some(on_load);
        self
    }

    pub fn with_tokens(mut self, token: impl Into<String>, refresh_token: Option<String>) -> Self {
        self.token = Some(token.into());
        self.refresh_token = refresh_token;
        self
    }

    pub fn with_callback(mut self, callback: CallbackParams) -> Self {
        self.callback = Some(callback);
        self
    }

    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    pub fn with_login_redirect(
        mut self,
        redirect: impl Fn(&LoginRequest) + Send + Sync + 'static,
    ) -> Self {
        self.login_redirect = Some(Arc::new(redirect));
        self
    }
}
