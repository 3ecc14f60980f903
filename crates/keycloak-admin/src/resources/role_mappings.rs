//! Role mappings of a user or group

use crate::dto::{MappingsRepresentation, RoleRepresentation};
use crate::error::Result;
use crate::resource::{Scope, join};

/// Role mappings under `.../{users|groups}/{id}/role-mappings`.
#[derive(Clone)]
pub struct RoleMappings<'a> {
    scope: Scope<'a>,
    base: Vec<String>,
}

impl<'a> RoleMappings<'a> {
    pub(crate) fn new(scope: Scope<'a>, owner: &[&str]) -> Self {
        let mut rest = owner.to_vec();
        rest.push("role-mappings");
        let base = scope.realm_path(&rest);
        Self { scope, base }
    }

    /// Realm and client mappings in one call.
    pub async fn list_all(&self) -> Result<MappingsRepresentation> {
        self.scope.get(&self.base).await
    }

    pub async fn list_realm(&self) -> Result<Vec<RoleRepresentation>> {
        self.scope.get(&join(&self.base, &["realm"])).await
    }

    pub async fn add_realm(&self, roles: &[RoleRepresentation]) -> Result<()> {
        self.scope.post(&join(&self.base, &["realm"]), roles).await
    }

    pub async fn del_realm(&self, roles: &[RoleRepresentation]) -> Result<()> {
        self.scope
            .delete_with(&join(&self.base, &["realm"]), roles)
            .await
    }

    pub async fn list_available_realm(&self) -> Result<Vec<RoleRepresentation>> {
        self.scope
            .get(&join(&self.base, &["realm", "available"]))
            .await
    }

    /// Effective realm roles, composites expanded.
    pub async fn list_composite_realm(&self) -> Result<Vec<RoleRepresentation>> {
        self.scope
            .get(&join(&self.base, &["realm", "composite"]))
            .await
    }

    /// `client` is the client's internal uuid.
    pub async fn list_client(&self, client: &str) -> Result<Vec<RoleRepresentation>> {
        self.scope.get(&join(&self.base, &["clients", client])).await
    }

    pub async fn add_client(&self, client: &str, roles: &[RoleRepresentation]) -> Result<()> {
        self.scope
            .post(&join(&self.base, &["clients", client]), roles)
            .await
    }

    pub async fn del_client(&self, client: &str, roles: &[RoleRepresentation]) -> Result<()> {
        self.scope
            .delete_with(&join(&self.base, &["clients", client]), roles)
            .await
    }

    pub async fn list_available_client(&self, client: &str) -> Result<Vec<RoleRepresentation>> {
        self.scope
            .get(&join(&self.base, &["clients", client, "available"]))
            .await
    }

    pub async fn list_composite_client(&self, client: &str) -> Result<Vec<RoleRepresentation>> {
        self.scope
            .get(&join(&self.base, &["clients", client, "composite"]))
            .await
    }
}
