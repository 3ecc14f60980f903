//! Argument parsing and command execution

use keycloak_admin::KeycloakAdminClient;
use keycloak_admin::dto::{ClientQuery, GroupQuery, UserQuery};
use serde_json::Value;

use crate::error::{Error, Result};

pub const USAGE: &str = "usage: kc-admin [--config PATH] <whoami|server-info|realms|users [search]|groups|clients|roles>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    WhoAmI,
    ServerInfo,
    Realms,
    Users { search: Option<String> },
    Groups,
    Clients,
    Roles,
}

/// Parsed command line.
#[derive(Debug, PartialEq, Eq)]
pub struct Args {
    pub config_path: Option<String>,
    pub command: Command,
}

impl Args {
    /// Parse arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config_path = None;
        let mut positional = Vec::new();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == "--config" {
                config_path = Some(args.next().ok_or(Error::MissingConfigPath)?);
            } else {
                positional.push(arg);
            }
        }

        let mut positional = positional.into_iter();
        let name = positional.next().ok_or(Error::MissingCommand)?;
        let command = match name.as_str() {
            "whoami" => Command::WhoAmI,
            "server-info" => Command::ServerInfo,
            "realms" => Command::Realms,
            "users" => Command::Users {
                search: positional.next(),
            },
            "groups" => Command::Groups,
            "clients" => Command::Clients,
            "roles" => Command::Roles,
            _ => return Err(Error::UnknownCommand(name)),
        };
        if let Some(extra) = positional.next() {
            return Err(Error::UnexpectedArgument(extra));
        }

        Ok(Self {
            config_path,
            command,
        })
    }
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::WhoAmI => "whoami",
            Command::ServerInfo => "server-info",
            Command::Realms => "realms",
            Command::Users { .. } => "users",
            Command::Groups => "groups",
            Command::Clients => "clients",
            Command::Roles => "roles",
        }
    }

    /// Run against the client's current realm and return the result as JSON.
    pub async fn run(&self, client: &KeycloakAdminClient) -> keycloak_admin::Result<Value> {
        let value = match self {
            Command::WhoAmI => to_json(client.who_am_i().find().await?),
            Command::ServerInfo => to_json(client.server_info().find().await?),
            Command::Realms => to_json(client.realms().find().await?),
            Command::Users { search } => {
                let query = match search {
                    Some(term) => UserQuery::search(term.clone()),
                    None => UserQuery::default(),
                };
                to_json(client.users().find(&query).await?)
            }
            Command::Groups => to_json(client.groups().find(&GroupQuery::default()).await?),
            Command::Clients => to_json(client.clients().find(&ClientQuery::default()).await?),
            Command::Roles => to_json(client.roles().find().await?),
        };
        value.map_err(|e| keycloak_admin::Error::Decode(e.to_string()))
    }
}

fn to_json<T: serde::Serialize>(value: T) -> serde_json::Result<Value> {
    serde_json::to_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use keycloak_admin::ConnectionConfig;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn args(list: &[&str]) -> Result<Args> {
        Args::parse(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_config_flag_anywhere() {
        let parsed = args(&["users", "--config", "/tmp/kc.toml", "alice"]).unwrap();
        assert_eq!(parsed.config_path.as_deref(), Some("/tmp/kc.toml"));
        assert_eq!(
            parsed.command,
            Command::Users {
                search: Some("alice".into())
            }
        );
    }

    #[test]
    fn rejects_bad_arguments() {
        assert_eq!(args(&[]).unwrap_err(), Error::MissingCommand);
        assert_eq!(args(&["--config"]).unwrap_err(), Error::MissingConfigPath);
        assert_eq!(
            args(&["frobnicate"]).unwrap_err(),
            Error::UnknownCommand("frobnicate".into())
        );
        assert_eq!(
            args(&["realms", "demo"]).unwrap_err(),
            Error::UnexpectedArgument("demo".into())
        );
    }

    #[tokio::test]
    async fn users_command_passes_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/realms/demo/users"))
            .and(query_param("search", "ali"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "u1", "username": "alice"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let mut client = KeycloakAdminClient::new(
            ConnectionConfig::new()
                .with_base_url(server.uri())
                .with_realm_name("demo"),
        );
        client.set_access_token("tok");

        let value = Command::Users {
            search: Some("ali".into()),
        }
        .run(&client)
        .await
        .unwrap();
        assert_eq!(value[0]["username"], "alice");
    }
}
