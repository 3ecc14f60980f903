//! `/admin/realms/{realm}/client-scopes`

use reqwest::Method;

use super::ProtocolMappers;
use crate::dto::{ClientScopeRef, ClientScopeRepresentation};
use crate::error::Result;

accessor!(
    /// Client scopes of a realm and the realm's default scope lists.
    ClientScopes
);

impl<'a> ClientScopes<'a> {
    pub async fn find(&self) -> Result<Vec<ClientScopeRepresentation>> {
        self.scope
            .get(&self.scope.realm_path(&["client-scopes"]))
            .await
    }

    /// Returns the new scope's id.
    pub async fn create(&self, scope: &ClientScopeRepresentation) -> Result<String> {
        self.scope
            .create(&self.scope.realm_path(&["client-scopes"]), scope)
            .await
    }

    pub async fn find_one(&self, id: &str) -> Result<Option<ClientScopeRepresentation>> {
        self.scope
            .get_optional(&self.scope.realm_path(&["client-scopes", id]))
            .await
    }

    pub async fn update(&self, id: &str, scope: &ClientScopeRepresentation) -> Result<()> {
        self.scope
            .put(&self.scope.realm_path(&["client-scopes", id]), scope)
            .await
    }

    pub async fn del(&self, id: &str) -> Result<()> {
        self.scope
            .delete(&self.scope.realm_path(&["client-scopes", id]))
            .await
    }

    /// There is no lookup by name on the server; this lists and filters.
    pub async fn find_one_by_name(&self, name: &str) -> Result<Option<ClientScopeRepresentation>> {
        Ok(self
            .find()
            .await?
            .into_iter()
            .find(|scope| scope.name.as_deref() == Some(name)))
    }

    /// Scopes assigned to new clients as default scopes.
    pub async fn list_default_client_scopes(&self) -> Result<Vec<ClientScopeRef>> {
        self.scope
            .get(&self.scope.realm_path(&["default-default-client-scopes"]))
            .await
    }

    pub async fn add_default_client_scope(&self, id: &str) -> Result<()> {
        self.scope
            .execute(
                Method::PUT,
                &self.scope.realm_path(&["default-default-client-scopes", id]),
                |b| b,
            )
            .await
    }

    pub async fn del_default_client_scope(&self, id: &str) -> Result<()> {
        self.scope
            .delete(&self.scope.realm_path(&["default-default-client-scopes", id]))
            .await
    }

    /// Scopes assigned to new clients as optional scopes.
    pub async fn list_default_optional_client_scopes(&self) -> Result<Vec<ClientScopeRef>> {
        self.scope
            .get(&self.scope.realm_path(&["default-optional-client-scopes"]))
            .await
    }

    pub async fn add_default_optional_client_scope(&self, id: &str) -> Result<()> {
        self.scope
            .execute(
                Method::PUT,
                &self.scope.realm_path(&["default-optional-client-scopes", id]),
                |b| b,
            )
            .await
    }

    pub async fn del_default_optional_client_scope(&self, id: &str) -> Result<()> {
        self.scope
            .delete(&self.scope.realm_path(&["default-optional-client-scopes", id]))
            .await
    }

    pub fn protocol_mappers(&self, id: &str) -> ProtocolMappers<'a> {
        ProtocolMappers::new(self.scope.clone(), &["client-scopes", id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::test_support::client;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn find_one_by_name_filters_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/admin/realms/master/client-scopes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "s1", "name": "profile", "protocol": "openid-connect"},
                {"id": "s2", "name": "email", "protocol": "openid-connect"}
            ])))
            .expect(2)
            .mount(&server)
            .await;

        let client = client(&server);
        let scopes = client.client_scopes();
        let email = scopes.find_one_by_name("email").await.unwrap().unwrap();
        assert_eq!(email.id.as_deref(), Some("s2"));
        assert!(scopes.find_one_by_name("roles").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn realm_default_optional_scope_paths() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/auth/admin/realms/master/default-optional-client-scopes/s1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/admin/realms/master/client-scopes/s1/protocol-mappers/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let scopes = client.client_scopes();
        scopes.add_default_optional_client_scope("s1").await.unwrap();
        assert!(scopes.protocol_mappers("s1").list().await.unwrap().is_empty());
    }
}
