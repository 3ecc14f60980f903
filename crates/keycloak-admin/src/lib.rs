//! Keycloak admin REST API client
//!
//! ```no_run
//! use keycloak_admin::{ConnectionConfig, Credentials, KeycloakAdminClient};
//!
//! # async fn run() -> keycloak_admin::Result<()> {
//! let mut client = KeycloakAdminClient::new(
//!     ConnectionConfig::new().with_base_url("http://localhost:8080"),
//! );
//! client
//!     .auth(&Credentials::password("admin-cli", "admin", "admin"))
//!     .await?;
//!
//! let users = client.users().realm("demo").find(&Default::default()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Every accessor call resolves the bearer token and connection settings
//! from the client at call time, so a token refreshed by an interactive
//! session or replaced with `set_access_token` is picked up by the next
//! request.

mod client;
pub mod dto;
pub mod error;
mod resource;
pub mod resources;

pub use client::KeycloakAdminClient;
pub use common::Secret;
pub use error::{Error, Result};
pub use keycloak_auth::{ADMIN_CLI_CLIENT_ID, Credentials};
pub use keycloak_session::{
    BoxFuture, CallbackParams, ConnectionConfig, InitOptions, InteractiveConfig,
    InteractiveSession, LoginRedirect, LoginRequest, OnLoad, SessionMode,
};
pub use request_config::RequestConfig;
