//! Admin REST API representations
//!
//! Field names follow the JSON the server sends (camelCase). Every field is
//! optional because the server omits unset values and partial updates send
//! only what changes. Fields not modelled here are kept in `extra` and sent
//! back unchanged on update.

mod authentication;
mod client;
mod client_scope;
mod component;
mod group;
mod identity_provider;
mod realm;
mod role;
mod server_info;
mod user;
mod whoami;

pub use authentication::*;
pub use client::*;
pub use client_scope::*;
pub use component::*;
pub use group::*;
pub use identity_provider::*;
pub use realm::*;
pub use role::*;
pub use server_info::*;
pub use user::*;
pub use whoami::*;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Unmodelled JSON fields.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Multi-valued attributes (`{"key": ["v1", "v2"]}`).
pub type Attributes = HashMap<String, Vec<String>>;

/// Describes one configurable property of a provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPropertyRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<bool>,
}

/// Protocol mapper attached to a client or client scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolMapperRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `openid-connect` or `saml`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Mapper type id, e.g. `oidc-usermodel-attribute-mapper`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_mapper: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub config: HashMap<String, String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Session of a user, as listed per user or per client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSessionRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Milliseconds since epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_access: Option<i64>,
    /// Client uuid to client id
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub clients: HashMap<String, String>,
}

/// `{"count": n}` bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Count {
    pub count: u64,
}

/// Pagination shared by list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

impl Page {
    pub fn new(first: u32, max: u32) -> Self {
        Self {
            first: Some(first),
            max: Some(max),
        }
    }
}
