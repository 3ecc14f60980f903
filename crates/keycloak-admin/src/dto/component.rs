//! Component (user storage, key providers, ...) representations

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{ConfigPropertyRepresentation, Extra};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// e.g. `ldap`, `rsa-generated`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    /// SPI interface, e.g. `org.keycloak.storage.UserStorageProvider`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<HashMap<String, Vec<String>>>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Filters for `GET /components`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentTypeRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default)]
    pub properties: Vec<ConfigPropertyRepresentation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubComponentTypeQuery<'a> {
    #[serde(rename = "type")]
    pub provider_type: &'a str,
}
