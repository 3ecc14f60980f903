//! Client facade
//!
//! `KeycloakAdminClient` owns the session state and hands out resource
//! accessors that borrow it. Operations that change the session take
//! `&mut self`, so no accessor call can be in flight while credentials or
//! connection settings change.

use std::collections::HashMap;

use keycloak_auth::Credentials;
use keycloak_session::{
    ConnectionConfig, InitOptions, InteractiveConfig, InteractiveSession, OidcSession,
    SessionMode, SessionState,
};
use request_config::RequestConfig;
use tracing::info;

use crate::error::Result;
use crate::resources::{
    AuthenticationManagement, ClientScopes, Clients, Components, Groups, IdentityProviders,
    Realms, Roles, ServerInfo, Users, WhoAmI,
};

pub struct KeycloakAdminClient {
    http: reqwest::Client,
    session: SessionState,
    realm_configs: HashMap<String, RequestConfig>,
}

impl KeycloakAdminClient {
    pub fn new(config: ConnectionConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Use a preconfigured HTTP client (proxy, custom roots, pooling).
    pub fn with_http_client(config: ConnectionConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            session: SessionState::new(config),
            realm_configs: HashMap::new(),
        }
    }

    /// Exchange `credentials` for tokens and store them.
    ///
    /// The stored tokens are only replaced when the exchange succeeds.
    pub async fn auth(&mut self, credentials: &Credentials) -> Result<()> {
        let response = keycloak_auth::acquire_token(
            &self.http,
            self.session.base_url(),
            self.session.realm_name(),
            credentials,
            self.session.request_config(),
        )
        .await?;
        self.session.store_tokens(response.token_pair());
        info!(
            realm = %self.session.realm_name(),
            grant_type = credentials.grant_type().as_str(),
            "admin client authenticated"
        );
        Ok(())
    }

    /// Start an OIDC browser-flow session and defer token handling to it.
    ///
    /// `config.url` defaults to the current base URL. On success the base URL
    /// becomes the session's server URL.
    pub async fn init(&mut self, options: InitOptions, config: InteractiveConfig) -> Result<()> {
        let session = OidcSession::new(&config, self.session.base_url(), self.http.clone())?;
        self.init_with_session(Box::new(session), &options).await
    }

    /// Attach a caller-provided interactive session.
    pub async fn init_with_session(
        &mut self,
        session: Box<dyn InteractiveSession>,
        options: &InitOptions,
    ) -> Result<()> {
        self.session.init_interactive(session, options).await?;
        Ok(())
    }

    /// Store an externally obtained access token as is.
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.session.set_access_token(token);
    }

    /// The bearer token used by resource calls. See `SessionState::access_token`.
    pub async fn get_access_token(&self) -> Option<String> {
        self.session.access_token().await
    }

    /// Start a login on the attached interactive session.
    pub async fn trigger_login(&self) -> Result<()> {
        self.session.trigger_login().await?;
        Ok(())
    }

    /// Global request overrides.
    pub fn get_request_config(&self) -> Option<&RequestConfig> {
        self.session.request_config()
    }

    /// Partial update: empty `base_url` / `realm_name` values are ignored.
    pub fn set_config(&mut self, config: ConnectionConfig) {
        self.session.apply_config(config);
    }

    /// Register request defaults for calls made against `realm`.
    pub fn set_realm_request_config(&mut self, realm: impl Into<String>, config: RequestConfig) {
        self.realm_configs.insert(realm.into(), config);
    }

    pub fn realm_request_config(&self, realm: &str) -> Option<&RequestConfig> {
        self.realm_configs.get(realm)
    }

    pub fn base_url(&self) -> &str {
        self.session.base_url()
    }

    pub fn realm_name(&self) -> &str {
        self.session.realm_name()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.session.refresh_token()
    }

    pub fn session_mode(&self) -> SessionMode {
        self.session.mode()
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    pub fn groups(&self) -> Groups<'_> {
        Groups::new(self)
    }

    pub fn roles(&self) -> Roles<'_> {
        Roles::new(self)
    }

    pub fn clients(&self) -> Clients<'_> {
        Clients::new(self)
    }

    pub fn realms(&self) -> Realms<'_> {
        Realms::new(self)
    }

    pub fn client_scopes(&self) -> ClientScopes<'_> {
        ClientScopes::new(self)
    }

    pub fn identity_providers(&self) -> IdentityProviders<'_> {
        IdentityProviders::new(self)
    }

    pub fn components(&self) -> Components<'_> {
        Components::new(self)
    }

    pub fn authentication_management(&self) -> AuthenticationManagement<'_> {
        AuthenticationManagement::new(self)
    }

    pub fn server_info(&self) -> ServerInfo<'_> {
        ServerInfo::new(self)
    }

    pub fn who_am_i(&self) -> WhoAmI<'_> {
        WhoAmI::new(self)
    }
}

impl Default for KeycloakAdminClient {
    fn default() -> Self {
        Self::new(ConnectionConfig::default())
    }
}

impl std::fmt::Debug for KeycloakAdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeycloakAdminClient")
            .field("session", &self.session)
            .field("realm_configs", &self.realm_configs)
            .finish_non_exhaustive()
    }
}
