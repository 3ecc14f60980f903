//! Error types for the admin client

/// Errors surfaced by the client facade and resource accessors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The token endpoint rejected the credentials or answered with garbage.
    #[error("authentication failed with status {status}: {body}")]
    Authentication { status: u16, body: String },

    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("interactive session initialization failed: {0}")]
    Initialization(String),

    /// Refresh or login failure reported by the interactive session.
    #[error("interactive session error: {0}")]
    Interactive(String),

    /// No bearer token is available. Raised before any request is sent.
    #[error("not authenticated: call auth or init first")]
    NotAuthenticated,

    /// The admin API answered with a non-2xx status.
    #[error("admin API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// A 2xx response whose body does not match the expected representation.
    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

/// Result alias for admin client operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// HTTP status carried by `Api` and `Authentication` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } | Error::Authentication { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<keycloak_auth::Error> for Error {
    fn from(err: keycloak_auth::Error) -> Self {
        match err {
            keycloak_auth::Error::Transport(msg) => Error::Transport(msg),
            keycloak_auth::Error::Authentication { status, body } => {
                Error::Authentication { status, body }
            }
            keycloak_auth::Error::InvalidCredentials(msg) => Error::InvalidCredentials(msg),
            keycloak_auth::Error::InvalidUrl(msg) => Error::InvalidUrl(msg),
        }
    }
}

impl From<keycloak_session::Error> for Error {
    fn from(err: keycloak_session::Error) -> Self {
        match err {
            keycloak_session::Error::Initialization(msg) => Error::Initialization(msg),
            keycloak_session::Error::Auth(inner) => inner.into(),
            other @ (keycloak_session::Error::Refresh(_)
            | keycloak_session::Error::Login(_)
            | keycloak_session::Error::InvalidToken(_)) => Error::Interactive(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_keep_their_variant() {
        let err: Error = keycloak_auth::Error::Authentication {
            status: 401,
            body: "invalid_grant".into(),
        }
        .into();
        assert!(matches!(err, Error::Authentication { status: 401, .. }));
        assert_eq!(err.status(), Some(401));

        let err: Error = keycloak_auth::Error::Transport("refused".into()).into();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[test]
    fn session_errors_map_to_facade_variants() {
        let err: Error = keycloak_session::Error::Initialization("bad realm".into()).into();
        assert!(matches!(err, Error::Initialization(ref m) if m == "bad realm"));

        let err: Error = keycloak_session::Error::Auth(keycloak_auth::Error::InvalidCredentials(
            "x".into(),
        ))
        .into();
        assert!(matches!(err, Error::InvalidCredentials(_)));

        let err: Error = keycloak_session::Error::Login("no session".into()).into();
        assert!(matches!(err, Error::Interactive(_)));
    }

    #[test]
    fn api_error_display_includes_status_and_body() {
        let err = Error::Api {
            status: 409,
            body: r#"{"errorMessage":"User exists"}"#.into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("409"));
        assert!(msg.contains("User exists"));
        assert_eq!(Error::NotAuthenticated.status(), None);
    }
}
