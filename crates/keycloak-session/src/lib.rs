//! Session state for the Keycloak admin client
//!
//! Holds the connection settings (base URL, realm, request overrides) and the
//! credentials every admin call needs, and decides where the bearer token
//! comes from:
//!
//! - `NoInteractiveSession`: the token stored by `auth` / `set_access_token`
//!   is returned verbatim, with no I/O.
//! - `InteractiveSession`: an attached browser-flow session owns the token.
//!   Each read refreshes it when it is within five seconds of expiry; when
//!   the refresh fails the session's login is triggered and the current
//!   (possibly stale or absent) token is returned anyway.
//!
//! The interactive flow sits behind the `InteractiveSession` trait.
//! `OidcSession` is the bundled implementation (authorization code + PKCE).

pub mod claims;
pub mod config;
pub mod error;
pub mod interactive;
pub mod oidc;
pub mod state;

pub use config::ConnectionConfig;
pub use error::{Error, Result};
pub use interactive::{
    BoxFuture, CallbackParams, InitOptions, InteractiveConfig, InteractiveSession, LoginRedirect,
    LoginRequest, OnLoad,
};
pub use oidc::OidcSession;
pub use state::{SessionMode, SessionState, TOKEN_MIN_VALIDITY};
