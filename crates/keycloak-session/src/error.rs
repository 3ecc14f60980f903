//! Error types for session operations

/// Errors from session and interactive-flow operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("interactive session initialization failed: {0}")]
    Initialization(String),

    #[error("token refresh failed: {0}")]
    Refresh(String),

    #[error("login could not be started: {0}")]
    Login(String),

    #[error("malformed token: {0}")]
    InvalidToken(String),

    #[error(transparent)]
    Auth(#[from] keycloak_auth::Error),
}

/// Result alias for session operations.
pub type Result<T> = std::result::Result<T, Error>;
