//! Error types for token endpoint operations

/// Errors from token acquisition.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced an HTTP response (DNS, TLS, connect, timeout).
    #[error("token request failed: {0}")]
    Transport(String),

    /// Non-2xx status, or a 2xx body that is not a token response.
    #[error("token endpoint returned {status}: {body}")]
    Authentication { status: u16, body: String },

    /// Rejected locally before any request was sent.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

/// Result alias for auth operations.
pub type Result<T> = std::result::Result<T, Error>;
