//! Types shared by the Keycloak admin client crates

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
