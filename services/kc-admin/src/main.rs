//! kc-admin
//!
//! Small command-line front end for the Keycloak admin client:
//! 1. Loads TOML config and resolves secrets from env vars or files
//! 2. Authenticates with the configured grant
//! 3. Runs one read-only admin command
//! 4. Prints the result as pretty JSON on stdout
//!
//! Logs go to stderr as JSON.

mod command;
mod config;
mod error;

use anyhow::{Context, Result};
use keycloak_admin::KeycloakAdminClient;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::command::{Args, USAGE};
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // JSON logs on stderr, filtered by LOG_LEVEL / RUST_LOG
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let args = Args::parse(std::env::args().skip(1)).context(USAGE)?;

    let config_path = Config::resolve_path(args.config_path.as_deref());
    info!(path = %config_path.display(), "loading configuration");

    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    info!(
        base_url = %config.keycloak.base_url,
        realm = %config.keycloak.realm,
        client_id = %config.auth.client_id,
        headers = config.headers.len(),
        "configuration loaded"
    );

    let mut client = KeycloakAdminClient::new(config.connection());
    let credentials = config.credentials()?;
    client
        .auth(&credentials)
        .await
        .with_context(|| format!("authentication against realm {} failed", config.keycloak.realm))?;

    let output = args
        .command
        .run(&client)
        .await
        .with_context(|| format!("{} failed", args.command.name()))?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
