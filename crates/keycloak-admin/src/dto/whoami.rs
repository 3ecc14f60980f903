//! Console identity of the token holder

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// `GET /admin/{realm}/console/whoami`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoAmIRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default)]
    pub create_realm: bool,
    /// Realm name to the admin permissions held in it
    #[serde(default)]
    pub realm_access: HashMap<String, Vec<String>>,
}
