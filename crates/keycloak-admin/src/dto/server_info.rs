//! Server info representation

use serde::{Deserialize, Serialize};

use super::Extra;

/// `GET /admin/serverinfo`. Provider catalogues are left as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfoRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_info: Option<SystemInfoRepresentation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_info: Option<MemoryInfoRepresentation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub themes: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub providers: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_mapper_types: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub builtin_protocol_mappers: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_providers: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_types: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_policies: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enums: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfoRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime_millis: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_name: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryInfoRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_percentage: Option<u64>,
    #[serde(flatten)]
    pub extra: Extra,
}
