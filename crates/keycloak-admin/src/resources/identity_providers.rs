//! `/admin/realms/{realm}/identity-provider`

use std::collections::HashMap;

use reqwest::Method;

use crate::dto::{
    IdentityProviderMapperRepresentation, IdentityProviderMapperTypeRepresentation,
    IdentityProviderRepresentation, ImportFromUrl,
};
use crate::error::Result;

accessor!(
    /// Identity brokering providers, addressed by alias.
    IdentityProviders
);

impl<'a> IdentityProviders<'a> {
    fn instance(&self, alias: &str, rest: &[&str]) -> Vec<String> {
        let mut segments = vec!["identity-provider", "instances", alias];
        segments.extend_from_slice(rest);
        self.scope.realm_path(&segments)
    }

    pub async fn find(&self) -> Result<Vec<IdentityProviderRepresentation>> {
        self.scope
            .get(&self.scope.realm_path(&["identity-provider", "instances"]))
            .await
    }

    /// Returns the provider alias.
    pub async fn create(&self, provider: &IdentityProviderRepresentation) -> Result<String> {
        self.scope
            .create(
                &self.scope.realm_path(&["identity-provider", "instances"]),
                provider,
            )
            .await
    }

    pub async fn find_one(&self, alias: &str) -> Result<Option<IdentityProviderRepresentation>> {
        self.scope.get_optional(&self.instance(alias, &[])).await
    }

    pub async fn update(
        &self,
        alias: &str,
        provider: &IdentityProviderRepresentation,
    ) -> Result<()> {
        self.scope.put(&self.instance(alias, &[]), provider).await
    }

    pub async fn del(&self, alias: &str) -> Result<()> {
        self.scope.delete(&self.instance(alias, &[])).await
    }

    /// Provider factory description (`oidc`, `saml`, `github`, ...).
    pub async fn find_factory(&self, provider_id: &str) -> Result<serde_json::Value> {
        self.scope
            .get(
                &self
                    .scope
                    .realm_path(&["identity-provider", "providers", provider_id]),
            )
            .await
    }

    pub async fn find_mappers(
        &self,
        alias: &str,
    ) -> Result<Vec<IdentityProviderMapperRepresentation>> {
        self.scope.get(&self.instance(alias, &["mappers"])).await
    }

    pub async fn find_one_mapper(
        &self,
        alias: &str,
        id: &str,
    ) -> Result<Option<IdentityProviderMapperRepresentation>> {
        self.scope
            .get_optional(&self.instance(alias, &["mappers", id]))
            .await
    }

    /// Returns the new mapper's id.
    pub async fn create_mapper(
        &self,
        alias: &str,
        mapper: &IdentityProviderMapperRepresentation,
    ) -> Result<String> {
        self.scope
            .create(&self.instance(alias, &["mappers"]), mapper)
            .await
    }

    pub async fn update_mapper(
        &self,
        alias: &str,
        id: &str,
        mapper: &IdentityProviderMapperRepresentation,
    ) -> Result<()> {
        self.scope
            .put(&self.instance(alias, &["mappers", id]), mapper)
            .await
    }

    pub async fn del_mapper(&self, alias: &str, id: &str) -> Result<()> {
        self.scope
            .delete(&self.instance(alias, &["mappers", id]))
            .await
    }

    /// Mapper types available for the provider, keyed by type id.
    pub async fn find_mapper_types(
        &self,
        alias: &str,
    ) -> Result<HashMap<String, IdentityProviderMapperTypeRepresentation>> {
        self.scope
            .get(&self.instance(alias, &["mapper-types"]))
            .await
    }

    /// Fetch and parse a remote provider descriptor (OIDC discovery or SAML
    /// metadata) into provider config.
    pub async fn import_from_url(&self, import: &ImportFromUrl) -> Result<HashMap<String, String>> {
        self.scope
            .request(
                Method::POST,
                &self.scope.realm_path(&["identity-provider", "import-config"]),
                |b| b.json(import),
            )
            .await
    }
}
