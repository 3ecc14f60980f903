//! Protocol mappers of a client or client scope

use crate::dto::ProtocolMapperRepresentation;
use crate::error::Result;
use crate::resource::{Scope, join};

/// Mappers under `.../{clients|client-scopes}/{id}/protocol-mappers`.
#[derive(Clone)]
pub struct ProtocolMappers<'a> {
    scope: Scope<'a>,
    base: Vec<String>,
}

impl<'a> ProtocolMappers<'a> {
    pub(crate) fn new(scope: Scope<'a>, owner: &[&str]) -> Self {
        let mut rest = owner.to_vec();
        rest.push("protocol-mappers");
        let base = scope.realm_path(&rest);
        Self { scope, base }
    }

    /// Returns the new mapper's id.
    pub async fn add(&self, mapper: &ProtocolMapperRepresentation) -> Result<String> {
        self.scope.create(&join(&self.base, &["models"]), mapper).await
    }

    pub async fn add_many(&self, mappers: &[ProtocolMapperRepresentation]) -> Result<()> {
        self.scope
            .post(&join(&self.base, &["add-models"]), mappers)
            .await
    }

    pub async fn list(&self) -> Result<Vec<ProtocolMapperRepresentation>> {
        self.scope.get(&join(&self.base, &["models"])).await
    }

    pub async fn find_one(&self, id: &str) -> Result<Option<ProtocolMapperRepresentation>> {
        self.scope
            .get_optional(&join(&self.base, &["models", id]))
            .await
    }

    /// Mappers for one protocol (`openid-connect`, `saml`).
    pub async fn find_by_protocol(
        &self,
        protocol: &str,
    ) -> Result<Vec<ProtocolMapperRepresentation>> {
        self.scope
            .get(&join(&self.base, &["protocol", protocol]))
            .await
    }

    pub async fn update(&self, id: &str, mapper: &ProtocolMapperRepresentation) -> Result<()> {
        self.scope
            .put(&join(&self.base, &["models", id]), mapper)
            .await
    }

    pub async fn del(&self, id: &str) -> Result<()> {
        self.scope.delete(&join(&self.base, &["models", id])).await
    }
}
