//! Credentials accepted by the token endpoint
//!
//! One variant per grant type. The variant decides the `grant_type` form
//! field and which fields must be present, so a password grant without a
//! password is rejected here rather than by the server.

use common::Secret;

use crate::constants::OFFLINE_ACCESS_SCOPE;
use crate::error::{Error, Result};

/// OAuth2 grant type sent as `grant_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantType {
    Password,
    ClientCredentials,
    RefreshToken,
    AuthorizationCode,
}

impl GrantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantType::Password => "password",
            GrantType::ClientCredentials => "client_credentials",
            GrantType::RefreshToken => "refresh_token",
            GrantType::AuthorizationCode => "authorization_code",
        }
    }
}

/// Credentials for a single token request.
///
/// A client secret, when present, is sent with HTTP Basic authentication and
/// never appears in the form body.
#[derive(Debug, Clone)]
pub enum Credentials {
    Password {
        client_id: String,
        username: String,
        password: Secret<String>,
        client_secret: Option<Secret<String>>,
        /// One-time code for users with OTP configured
        totp: Option<String>,
        /// Request `offline_access` so the refresh token survives SSO logout
        offline: bool,
    },
    ClientCredentials {
        client_id: String,
        client_secret: Secret<String>,
    },
    RefreshToken {
        client_id: String,
        refresh_token: Secret<String>,
        client_secret: Option<Secret<String>>,
    },
}

impl Credentials {
    pub fn password(
        client_id: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<Secret<String>>,
    ) -> Self {
        Credentials::Password {
            client_id: client_id.into(),
            username: username.into(),
            password: password.into(),
            client_secret: None,
            totp: None,
            offline: false,
        }
    }

    pub fn client_credentials(
        client_id: impl Into<String>,
        client_secret: impl Into<Secret<String>>,
    ) -> Self {
        Credentials::ClientCredentials {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn refresh_token(
        client_id: impl Into<String>,
        refresh_token: impl Into<Secret<String>>,
    ) -> Self {
        Credentials::RefreshToken {
            client_id: client_id.into(),
            refresh_token: refresh_token.into(),
            client_secret: None,
        }
    }

    /// Attach a client secret (confidential clients). Client-credentials
    /// grants already carry one and are replaced.
    pub fn with_client_secret(mut self, secret: impl Into<Secret<String>>) -> Self {
        let secret = secret.into();
        match &mut self {
            Credentials::Password { client_secret, .. }
            | Credentials::RefreshToken { client_secret, .. } => *client_secret = Some(secret),
            Credentials::ClientCredentials { client_secret, .. } => *client_secret = secret,
        }
        self
    }

    /// Attach a TOTP code. Only meaningful for password grants.
    pub fn with_totp(mut self, code: impl Into<String>) -> Self {
        if let Credentials::Password { totp, .. } = &mut self {
            *totp = Some(code.into());
        }
        self
    }

    /// Request an offline token. Only meaningful for password grants.
    pub fn offline(mut self) -> Self {
        if let Credentials::Password { offline, .. } = &mut self {
            *offline = true;
        }
        self
    }

    pub fn grant_type(&self) -> GrantType {
        match self {
            Credentials::Password { .. } => GrantType::Password,
            Credentials::ClientCredentials { .. } => GrantType::ClientCredentials,
            Credentials::RefreshToken { .. } => GrantType::RefreshToken,
        }
    }

    pub fn client_id(&self) -> &str {
        match self {
            Credentials::Password { client_id, .. }
            | Credentials::ClientCredentials { client_id, .. }
            | Credentials::RefreshToken { client_id, .. } => client_id,
        }
    }

    pub fn client_secret(&self) -> Option<&Secret<String>> {
        match self {
            Credentials::Password { client_secret, .. }
            | Credentials::RefreshToken { client_secret, .. } => client_secret.as_ref(),
            Credentials::ClientCredentials { client_secret, .. } => Some(client_secret),
        }
    }

    /// Check the required fields for this grant type.
    pub fn validate(&self) -> Result<()> {
        if self.client_id().trim().is_empty() {
            return Err(Error::InvalidCredentials("client_id must not be empty".into()));
        }
        match self {
            Credentials::Password {
                username, password, ..
            } => {
                if username.trim().is_empty() {
                    return Err(Error::InvalidCredentials(
                        "password grant requires a username".into(),
                    ));
                }
                if password.is_blank() {
                    return Err(Error::InvalidCredentials(
                        "password grant requires a password".into(),
                    ));
                }
            }
            Credentials::ClientCredentials { client_secret, .. } => {
                if client_secret.is_blank() {
                    return Err(Error::InvalidCredentials(
                        "client_credentials grant requires a client secret".into(),
                    ));
                }
            }
            Credentials::RefreshToken { refresh_token, .. } => {
                if refresh_token.is_blank() {
                    return Err(Error::InvalidCredentials(
                        "refresh_token grant requires a refresh token".into(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Form fields for the token request (client secret excluded).
    pub fn form_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("grant_type", self.grant_type().as_str().to_string()),
            ("client_id", self.client_id().to_string()),
        ];
        match self {
            Credentials::Password {
                username,
                password,
                totp,
                offline,
                ..
            } => {
                params.push(("username", username.clone()));
                params.push(("password", password.expose().clone()));
                if let Some(code) = totp {
                    params.push(("totp", code.clone()));
                }
                if *offline {
                    params.push(("scope", OFFLINE_ACCESS_SCOPE.to_string()));
                }
            }
            Credentials::ClientCredentials { .. } => {}
            Credentials::RefreshToken { refresh_token, .. } => {
                params.push(("refresh_token", refresh_token.expose().clone()));
            }
        }
        params
    }
}
