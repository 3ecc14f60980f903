//! Role and role mapping representations

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Attributes, Extra};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composites: Option<RoleComposites>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_role: Option<bool>,
    /// Realm id or client uuid owning the role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl RoleRepresentation {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Roles a composite role includes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleComposites {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm: Option<Vec<String>>,
    /// Client id to role names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<HashMap<String, Vec<String>>>,
}

/// Every role mapping of a user or group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingsRepresentation {
    #[serde(default)]
    pub realm_mappings: Vec<RoleRepresentation>,
    /// Keyed by client id
    #[serde(default)]
    pub client_mappings: HashMap<String, ClientMappingsRepresentation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientMappingsRepresentation {
    /// Client uuid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Client id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default)]
    pub mappings: Vec<RoleRepresentation>,
}

/// Parameters for listing the holders of a role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleUsersQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief_representation: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mappings_deserialize_realm_and_client_parts() {
        let json = serde_json::json!({
            "realmMappings": [{"id": "r1", "name": "offline_access", "composite": false}],
            "clientMappings": {
                "account": {
                    "id": "c-uuid",
                    "client": "account",
                    "mappings": [{"id": "r2", "name": "view-profile", "clientRole": true}]
                }
            }
        });
        let mappings: MappingsRepresentation = serde_json::from_value(json).unwrap();
        assert_eq!(mappings.realm_mappings[0].name.as_deref(), Some("offline_access"));
        let account = &mappings.client_mappings["account"];
        assert_eq!(account.id.as_deref(), Some("c-uuid"));
        assert_eq!(account.mappings[0].client_role, Some(true));
    }

    #[test]
    fn empty_mappings_body_is_accepted() {
        let mappings: MappingsRepresentation = serde_json::from_str("{}").unwrap();
        assert!(mappings.realm_mappings.is_empty());
        assert!(mappings.client_mappings.is_empty());
    }
}
