//! Configuration types and loading
//!
//! Config precedence: CLI args > env vars > config file > defaults.
//! The password and client secret are loaded from `KEYCLOAK_PASSWORD` /
//! `KEYCLOAK_CLIENT_SECRET` or from a `*_file` path, never from the TOML
//! directly.

use common::Secret;
use keycloak_admin::{ADMIN_CLI_CLIENT_ID, ConnectionConfig, Credentials, RequestConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration
#[derive(Debug, Deserialize)]
pub struct Config {
    pub keycloak: KeycloakConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub headers: Vec<HeaderInjection>,
}

/// Where the admin API lives
#[derive(Debug, Deserialize)]
pub struct KeycloakConfig {
    pub base_url: String,
    /// Realm the admin user or service account authenticates against
    #[serde(default = "default_realm")]
    pub realm: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantKind {
    Password,
    ClientCredentials,
}

/// Token endpoint credentials
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    pub grant_type: GrantKind,
    #[serde(default = "default_client_id")]
    pub client_id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(skip)]
    pub password: Option<Secret<String>>,
    #[serde(default)]
    pub password_file: Option<PathBuf>,
    #[serde(skip)]
    pub client_secret: Option<Secret<String>>,
    #[serde(default)]
    pub client_secret_file: Option<PathBuf>,
}

/// Header added to every admin and token request
#[derive(Debug, Clone, Deserialize)]
pub struct HeaderInjection {
    pub name: String,
    pub value: String,
}

fn default_realm() -> String {
    "master".into()
}

fn default_client_id() -> String {
    ADMIN_CLI_CLIENT_ID.into()
}

fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Load configuration from a TOML file, then overlay environment variables.
    ///
    /// Secret resolution order, per secret:
    /// 1. env var (`KEYCLOAK_PASSWORD`, `KEYCLOAK_CLIENT_SECRET`)
    /// 2. `password_file` / `client_secret_file` path from config
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;

        if !config.keycloak.base_url.starts_with("http://")
            && !config.keycloak.base_url.starts_with("https://")
        {
            return Err(common::Error::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                config.keycloak.base_url
            )));
        }

        if config.keycloak.timeout_secs == 0 {
            return Err(common::Error::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        config.auth.password =
            resolve_secret("KEYCLOAK_PASSWORD", config.auth.password_file.as_deref())?;
        config.auth.client_secret = resolve_secret(
            "KEYCLOAK_CLIENT_SECRET",
            config.auth.client_secret_file.as_deref(),
        )?;

        match config.auth.grant_type {
            GrantKind::Password => {
                if config.auth.username.as_deref().is_none_or(str::is_empty) {
                    return Err(common::Error::Config(
                        "password grant requires auth.username".into(),
                    ));
                }
                if config.auth.password.is_none() {
                    return Err(common::Error::MissingSecret(
                        "KEYCLOAK_PASSWORD or auth.password_file".into(),
                    ));
                }
            }
            GrantKind::ClientCredentials => {
                if config.auth.client_secret.is_none() {
                    return Err(common::Error::MissingSecret(
                        "KEYCLOAK_CLIENT_SECRET or auth.client_secret_file".into(),
                    ));
                }
            }
        }

        Ok(config)
    }

    /// Resolve config file path from CLI arg or CONFIG_PATH env var.
    pub fn resolve_path(cli_path: Option<&str>) -> PathBuf {
        if let Some(p) = cli_path {
            return PathBuf::from(p);
        }
        if let Ok(p) = std::env::var("CONFIG_PATH") {
            return PathBuf::from(p);
        }
        PathBuf::from("kc-admin.toml")
    }

    /// Connection settings for the admin client. Configured headers and the
    /// timeout become global request overrides.
    pub fn connection(&self) -> ConnectionConfig {
        let mut overrides =
            RequestConfig::new().with_timeout(Duration::from_secs(self.keycloak.timeout_secs));
        for header in &self.headers {
            overrides.set_header(&header.name, header.value.clone());
        }
        ConnectionConfig::new()
            .with_base_url(self.keycloak.base_url.clone())
            .with_realm_name(self.keycloak.realm.clone())
            .with_request_config(overrides)
    }

    pub fn credentials(&self) -> common::Result<Credentials> {
        let auth = &self.auth;
        let credentials = match auth.grant_type {
            GrantKind::Password => {
                let password = auth
                    .password
                    .clone()
                    .ok_or_else(|| common::Error::MissingSecret("KEYCLOAK_PASSWORD".into()))?;
                let credentials = Credentials::password(
                    auth.client_id.clone(),
                    auth.username.clone().unwrap_or_default(),
                    password,
                );
                match auth.client_secret.clone() {
                    Some(secret) => credentials.with_client_secret(secret),
                    None => credentials,
                }
            }
            GrantKind::ClientCredentials => {
                let secret = auth.client_secret.clone().ok_or_else(|| {
                    common::Error::MissingSecret("KEYCLOAK_CLIENT_SECRET".into())
                })?;
                Credentials::client_credentials(auth.client_id.clone(), secret)
            }
        };
        Ok(credentials)
    }
}

/// Env var wins over the file. Blank values count as unset.
fn resolve_secret(env: &str, file: Option<&Path>) -> common::Result<Option<Secret<String>>> {
    if let Ok(value) = std::env::var(env) {
        if !value.trim().is_empty() {
            return Ok(Some(Secret::new(value)));
        }
    }
    let Some(file) = file else {
        return Ok(None);
    };
    let value = std::fs::read_to_string(file).map_err(|e| {
        common::Error::Config(format!("failed to read {}: {e}", file.display()))
    })?;
    let value = value.trim().to_owned();
    Ok((!value.is_empty()).then(|| Secret::new(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mutex to serialize tests that mutate environment variables, preventing
    /// data races when tests run in parallel.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// SAFETY: Callers must hold ENV_MUTEX to prevent concurrent env mutation.
    unsafe fn set_env(key: &str, val: &str) {
        unsafe { std::env::set_var(key, val) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    fn clear_secrets() {
        unsafe {
            remove_env("KEYCLOAK_PASSWORD");
            remove_env("KEYCLOAK_CLIENT_SECRET");
        }
    }

    fn write_config(name: &str, contents: &str) -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(format!("kc-admin-test-{name}"));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    fn password_toml() -> &'static str {
        r#"
[keycloak]
base_url = "https://sso.example.com"

[auth]
grant_type = "password"
client_id = "admin-cli"
username = "admin"

[[headers]]
name = "X-Request-Source"
value = "kc-admin"
"#
    }

    #[test]
    fn test_load_password_config_from_env() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_secrets();
        unsafe { set_env("KEYCLOAK_PASSWORD", "s3cret") };
        let (dir, path) = write_config("password", password_toml());

        let config = Config::load(&path).unwrap();
        assert_eq!(config.keycloak.realm, "master");
        assert_eq!(config.keycloak.timeout_secs, 30);
        assert_eq!(config.auth.password.as_ref().unwrap().expose(), "s3cret");
        assert_eq!(config.headers.len(), 1);

        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.client_id(), "admin-cli");
        assert!(credentials.client_secret().is_none());

        clear_secrets();
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_env_secret_wins_over_file() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_secrets();
        let dir = std::env::temp_dir().join("kc-admin-test-precedence");
        std::fs::create_dir_all(&dir).unwrap();
        let secret_file = dir.join("secret");
        std::fs::write(&secret_file, "from-file\n").unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            format!(
                r#"
[keycloak]
base_url = "http://localhost:8080"

[auth]
grant_type = "client_credentials"
client_id = "automation"
client_secret_file = "{}"
"#,
                secret_file.display()
            ),
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.auth.client_secret.as_ref().unwrap().expose(),
            "from-file"
        );

        unsafe { set_env("KEYCLOAK_CLIENT_SECRET", "from-env") };
        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.auth.client_secret.as_ref().unwrap().expose(),
            "from-env"
        );

        clear_secrets();
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_password_is_rejected() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_secrets();
        let (dir, path) = write_config("no-password", password_toml());

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, common::Error::MissingSecret(_)));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_secrets();
        unsafe { set_env("KEYCLOAK_PASSWORD", "s3cret") };
        let (dir, path) = write_config(
            "bad-url",
            &password_toml().replace("https://sso.example.com", "ftp://sso.example.com"),
        );

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("base_url"));

        clear_secrets();
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_secrets();
        unsafe { set_env("KEYCLOAK_PASSWORD", "s3cret") };
        let (dir, path) = write_config(
            "zero-timeout",
            &password_toml().replace(
                "base_url = \"https://sso.example.com\"",
                "base_url = \"https://sso.example.com\"\ntimeout_secs = 0",
            ),
        );

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));

        clear_secrets();
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_password_grant_requires_username() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_secrets();
        unsafe { set_env("KEYCLOAK_PASSWORD", "s3cret") };
        let (dir, path) = write_config(
            "no-username",
            &password_toml().replace("username = \"admin\"\n", ""),
        );

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("username"));

        clear_secrets();
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_connection_carries_headers_and_timeout() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_secrets();
        unsafe { set_env("KEYCLOAK_PASSWORD", "s3cret") };
        let (dir, path) = write_config("connection", password_toml());

        let config = Config::load(&path).unwrap();
        let expected = RequestConfig::new()
            .with_timeout(Duration::from_secs(30))
            .with_header("x-request-source", "kc-admin");
        assert_eq!(config.connection().request_config, Some(expected));

        clear_secrets();
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_client_id_defaults_to_admin_cli() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_secrets();
        unsafe { set_env("KEYCLOAK_PASSWORD", "s3cret") };
        let (dir, path) = write_config(
            "default-client",
            &password_toml().replace("client_id = \"admin-cli\"\n", ""),
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.auth.client_id, "admin-cli");

        clear_secrets();
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_path_prefers_cli() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { set_env("CONFIG_PATH", "/etc/kc-admin/env.toml") };
        assert_eq!(
            Config::resolve_path(Some("/tmp/cli.toml")),
            PathBuf::from("/tmp/cli.toml")
        );
        assert_eq!(
            Config::resolve_path(None),
            PathBuf::from("/etc/kc-admin/env.toml")
        );
        unsafe { remove_env("CONFIG_PATH") };
        assert_eq!(Config::resolve_path(None), PathBuf::from("kc-admin.toml"));
    }
}
