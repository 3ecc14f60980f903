//! Client scope representations

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Extra, ProtocolMapperRepresentation};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientScopeRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_mappers: Option<Vec<ProtocolMapperRepresentation>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ClientScopeRepresentation {
    pub fn openid_connect(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            protocol: Some("openid-connect".into()),
            ..Default::default()
        }
    }
}
