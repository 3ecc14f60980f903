//! Session state and bearer token resolution

use std::time::Duration;

use common::Secret;
use keycloak_auth::{DEFAULT_BASE_URL, DEFAULT_REALM, TokenPair};
use request_config::RequestConfig;
use tracing::{debug, info, warn};

use crate::config::ConnectionConfig;
use crate::error::{Error, Result};
use crate::interactive::{InitOptions, InteractiveSession};

/// Freshness margin applied before returning an interactive session's token.
pub const TOKEN_MIN_VALIDITY: Duration = Duration::from_secs(5);

/// Where `access_token` reads the bearer token from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Stored token, returned verbatim
    NoInteractiveSession,
    /// Owned and refreshed by the attached interactive session
    InteractiveSession,
}

/// Mutable state shared by the client facade and its resource accessors.
///
/// Tokens are replaced wholesale, never merged. Once an interactive session
/// is attached there is no way back to the stored-token mode.
pub struct SessionState {
    base_url: String,
    realm_name: String,
    access_token: Option<Secret<String>>,
    refresh_token: Option<Secret<String>>,
    interactive: Option<Box<dyn InteractiveSession>>,
    request_config: Option<RequestConfig>,
}

impl SessionState {
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            base_url: config
                .effective_base_url()
                .unwrap_or(DEFAULT_BASE_URL)
                .to_string(),
            realm_name: config
                .effective_realm_name()
                .unwrap_or(DEFAULT_REALM)
                .to_string(),
            access_token: None,
            refresh_token: None,
            interactive: None,
            request_config: config.request_config,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn realm_name(&self) -> &str {
        &self.realm_name
    }

    pub fn request_config(&self) -> Option<&RequestConfig> {
        self.request_config.as_ref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_ref().map(|t| t.expose().as_str())
    }

    pub fn mode(&self) -> SessionMode {
        if self.interactive.is_some() {
            SessionMode::InteractiveSession
        } else {
            SessionMode::NoInteractiveSession
        }
    }

    /// Replace both tokens with the result of a successful grant.
    pub fn store_tokens(&mut self, tokens: TokenPair) {
        self.access_token = Some(Secret::new(tokens.access_token));
        self.refresh_token = tokens.refresh_token.map(Secret::new);
        debug!(realm = %self.realm_name, "session tokens replaced");
    }

    /// Overwrite the stored access token. No validation.
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(Secret::new(token.into()));
    }

    /// Apply the non-empty fields of `config`. A request config, when given,
    /// replaces the global one.
    pub fn apply_config(&mut self, config: ConnectionConfig) {
        if let Some(base_url) = config.effective_base_url() {
            self.base_url = base_url.to_string();
        }
        if let Some(realm_name) = config.effective_realm_name() {
            self.realm_name = realm_name.to_string();
        }
        if let Some(request_config) = config.request_config {
            self.request_config = Some(request_config);
        }
    }

    /// Initialize `session` and attach it on success.
    ///
    /// The session's server URL replaces the configured base URL. On failure
    /// nothing changes.
    pub async fn init_interactive(
        &mut self,
        session: Box<dyn InteractiveSession>,
        options: &InitOptions,
    ) -> Result<()> {
        if let Err(e) = session.init(options).await {
            warn!(error = %e, "interactive session initialization failed");
            return Err(match e {
                Error::Initialization(_) => e,
                other => Error::Initialization(other.to_string()),
            });
        }
        self.base_url = session.auth_server_url().to_string();
        self.interactive = Some(session);
        info!(base_url = %self.base_url, "interactive session attached");
        Ok(())
    }

    /// Current bearer token, if any.
    ///
    /// Without an interactive session this is a plain read. With one, the
    /// token is refreshed when it expires within `TOKEN_MIN_VALIDITY`; if the
    /// refresh fails a login is started and whatever token the session holds
    /// is returned. This never fails.
    pub async fn access_token(&self) -> Option<String> {
        let Some(session) = self.interactive.as_deref() else {
            return self.access_token.as_ref().map(|t| t.expose().clone());
        };

        if let Err(e) = session.refresh_if_needed(TOKEN_MIN_VALIDITY).await {
            warn!(error = %e, "token refresh failed, starting interactive login");
            if let Err(e) = session.trigger_login().await {
                warn!(error = %e, "interactive login could not be started");
            }
        }
        session.current_token().await
    }

    /// Start an interactive login.
    pub async fn trigger_login(&self) -> Result<()> {
        match self.interactive.as_deref() {
            Some(session) => session.trigger_login().await,
            None => Err(Error::Login("no interactive session attached".into())),
        }
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("base_url", &self.base_url)
            .field("realm_name", &self.realm_name)
            .field("access_token", &self.access_token)
            .field("refresh_token", &self.refresh_token)
            .field("mode", &self.mode())
            .field("request_config", &self.request_config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interactive::BoxFuture;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Scripted interactive session recording the calls it receives.
    #[derive(Default)]
    struct MockSession {
        fail_init: bool,
        fail_refresh: bool,
        token: Option<String>,
        refresh_calls: Arc<AtomicUsize>,
        login_calls: Arc<AtomicUsize>,
        initialized: Arc<AtomicBool>,
    }

    impl InteractiveSession for MockSession {
        fn init<'a>(&'a self, _options: &'a InitOptions) -> BoxFuture<'a, Result<()>> {
            Box::pin(async move {
                if self.fail_init {
                    return Err(Error::Initialization("sso check failed".into()));
                }
                self.initialized.store(true, Ordering::SeqCst);
                Ok(())
            })
        }

        fn refresh_if_needed(&self, min_validity: Duration) -> BoxFuture<'_, Result<bool>> {
            Box::pin(async move {
                assert_eq!(min_validity, TOKEN_MIN_VALIDITY);
                self.refresh_calls.fetch_add(1, Ordering::SeqCst);
                if self.fail_refresh {
                    Err(Error::Refresh("refresh token expired".into()))
                } else {
                    Ok(false)
                }
            })
        }

        fn current_token(&self) -> BoxFuture<'_, Option<String>> {
            Box::pin(async move { self.token.clone() })
        }

        fn trigger_login(&self) -> BoxFuture<'_, Result<()>> {
            Box::pin(async move {
                self.login_calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        }

        fn auth_server_url(&self) -> &str {
            "https://sso.example.com/auth"
        }
    }

    #[test]
    fn defaults_apply_for_missing_or_empty_fields() {
        let state = SessionState::new(ConnectionConfig::new());
        assert_eq!(state.base_url(), "http://127.0.0.1:8080/auth");
        assert_eq!(state.realm_name(), "master");
        assert!(state.request_config().is_none());

        let state = SessionState::new(ConnectionConfig::new().with_base_url("").with_realm_name(""));
        assert_eq!(state.base_url(), "http://127.0.0.1:8080/auth");
        assert_eq!(state.realm_name(), "master");
    }

    #[test]
    fn apply_config_ignores_empty_values() {
        let mut state = SessionState::new(ConnectionConfig::new().with_base_url("http://kc:8080/auth"));
        state.apply_config(ConnectionConfig::new().with_base_url(""));
        state.apply_config(ConnectionConfig::new().with_realm_name("demo"));
        assert_eq!(state.base_url(), "http://kc:8080/auth");
        assert_eq!(state.realm_name(), "demo");

        state.apply_config(ConnectionConfig::new().with_realm_name("demo"));
        assert_eq!(state.realm_name(), "demo");
    }

    #[test]
    fn apply_config_replaces_request_config() {
        let mut state = SessionState::new(ConnectionConfig::new());
        state.apply_config(
            ConnectionConfig::new().with_request_config(RequestConfig::new().with_header("x-a", "1")),
        );
        assert_eq!(state.request_config().unwrap().header("x-a"), Some("1"));
    }

    #[tokio::test]
    async fn set_access_token_is_idempotent() {
        let mut once = SessionState::new(ConnectionConfig::new());
        once.set_access_token("X");
        let mut twice = SessionState::new(ConnectionConfig::new());
        twice.set_access_token("X");
        twice.set_access_token("X");

        assert_eq!(once.access_token().await, twice.access_token().await);
        assert_eq!(format!("{once:?}"), format!("{twice:?}"));
    }

    #[tokio::test]
    async fn store_tokens_replaces_wholesale() {
        let mut state = SessionState::new(ConnectionConfig::new());
        state.store_tokens(TokenPair {
            access_token: "A".into(),
            refresh_token: Some("B".into()),
        });
        assert_eq!(state.access_token().await.as_deref(), Some("A"));
        assert_eq!(state.refresh_token(), Some("B"));

        state.store_tokens(TokenPair {
            access_token: "C".into(),
            refresh_token: None,
        });
        assert_eq!(state.access_token().await.as_deref(), Some("C"));
        assert_eq!(state.refresh_token(), None);
    }

    #[tokio::test]
    async fn stored_token_read_has_no_side_effects() {
        let state = SessionState::new(ConnectionConfig::new());
        assert_eq!(state.mode(), SessionMode::NoInteractiveSession);
        assert!(state.access_token().await.is_none());
        assert!(state.access_token().await.is_none());
    }

    #[tokio::test]
    async fn init_failure_leaves_state_untouched() {
        let mut state = SessionState::new(ConnectionConfig::new().with_base_url("http://hint/auth"));
        let session = MockSession {
            fail_init: true,
            ..Default::default()
        };
        let err = state
            .init_interactive(Box::new(session), &InitOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Initialization(_)));
        assert_eq!(state.mode(), SessionMode::NoInteractiveSession);
        assert_eq!(state.base_url(), "http://hint/auth");
    }

    #[tokio::test]
    async fn init_success_attaches_and_adopts_server_url() {
        let mut state = SessionState::new(ConnectionConfig::new().with_base_url("http://hint/auth"));
        let initialized = Arc::new(AtomicBool::new(false));
        let session = MockSession {
            token: Some("interactive".into()),
            initialized: initialized.clone(),
            ..Default::default()
        };
        state.set_access_token("stored");
        state
            .init_interactive(Box::new(session), &InitOptions::new())
            .await
            .unwrap();

        assert!(initialized.load(Ordering::SeqCst));
        assert_eq!(state.mode(), SessionMode::InteractiveSession);
        assert_eq!(state.base_url(), "https://sso.example.com/auth");
        assert_eq!(state.access_token().await.as_deref(), Some("interactive"));
    }

    #[tokio::test]
    async fn refresh_failure_triggers_login_once_and_returns_token() {
        let refresh_calls = Arc::new(AtomicUsize::new(0));
        let login_calls = Arc::new(AtomicUsize::new(0));
        let mut state = SessionState::new(ConnectionConfig::new());
        state
            .init_interactive(
                Box::new(MockSession {
                    fail_refresh: true,
                    token: Some("stale".into()),
                    refresh_calls: refresh_calls.clone(),
                    login_calls: login_calls.clone(),
                    ..Default::default()
                }),
                &InitOptions::new(),
            )
            .await
            .unwrap();

        let token = state.access_token().await;
        assert_eq!(token.as_deref(), Some("stale"));
        assert_eq!(refresh_calls.load(Ordering::SeqCst), 1);
        assert_eq!(login_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refresh_failure_with_no_token_returns_none() {
        let login_calls = Arc::new(AtomicUsize::new(0));
        let mut state = SessionState::new(ConnectionConfig::new());
        state
            .init_interactive(
                Box::new(MockSession {
                    fail_refresh: true,
                    login_calls: login_calls.clone(),
                    ..Default::default()
                }),
                &InitOptions::new(),
            )
            .await
            .unwrap();

        assert!(state.access_token().await.is_none());
        assert_eq!(login_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn successful_refresh_does_not_log_in() {
        let login_calls = Arc::new(AtomicUsize::new(0));
        let mut state = SessionState::new(ConnectionConfig::new());
        state
            .init_interactive(
                Box::new(MockSession {
                    token: Some("fresh".into()),
                    login_calls: login_calls.clone(),
                    ..Default::default()
                }),
                &InitOptions::new(),
            )
            .await
            .unwrap();

        assert_eq!(state.access_token().await.as_deref(), Some("fresh"));
        assert_eq!(login_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn trigger_login_requires_interactive_session() {
        let state = SessionState::new(ConnectionConfig::new());
        assert!(matches!(state.trigger_login().await, Err(Error::Login(_))));
    }

    #[test]
    fn debug_output_redacts_tokens() {
        let mut state = SessionState::new(ConnectionConfig::new());
        state.set_access_token("eyJsecret");
        let debug = format!("{state:?}");
        assert!(!debug.contains("eyJsecret"), "got: {debug}");
    }
}
