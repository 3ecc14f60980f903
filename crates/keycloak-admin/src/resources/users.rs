//! `/admin/realms/{realm}/users`

use reqwest::Method;
use serde::Serialize;

use super::RoleMappings;
use crate::dto::{
    CredentialRepresentation, ExecuteActionsEmail, FederatedIdentityRepresentation,
    GroupRepresentation, UserConsentRepresentation, UserGroupsQuery, UserQuery,
    UserRepresentation, UserSessionRepresentation,
};
use crate::error::Result;

accessor!(
    /// Users of a realm.
    Users
);

#[derive(Serialize)]
struct VerifyEmailQuery<'q> {
    #[serde(skip_serializing_if = "Option::is_none")]
    client_id: Option<&'q str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_uri: Option<&'q str>,
}

impl<'a> Users<'a> {
    pub async fn find(&self, query: &UserQuery) -> Result<Vec<UserRepresentation>> {
        self.scope
            .get_with(&self.scope.realm_path(&["users"]), query)
            .await
    }

    /// Number of users matching `query` (pagination fields are ignored).
    pub async fn count(&self, query: &UserQuery) -> Result<u64> {
        self.scope
            .get_with(&self.scope.realm_path(&["users", "count"]), query)
            .await
    }

    /// Returns the new user's id.
    pub async fn create(&self, user: &UserRepresentation) -> Result<String> {
        self.scope
            .create(&self.scope.realm_path(&["users"]), user)
            .await
    }

    pub async fn find_one(&self, id: &str) -> Result<Option<UserRepresentation>> {
        self.scope
            .get_optional(&self.scope.realm_path(&["users", id]))
            .await
    }

    pub async fn update(&self, id: &str, user: &UserRepresentation) -> Result<()> {
        self.scope
            .put(&self.scope.realm_path(&["users", id]), user)
            .await
    }

    pub async fn del(&self, id: &str) -> Result<()> {
        self.scope
            .delete(&self.scope.realm_path(&["users", id]))
            .await
    }

    pub fn role_mappings(&self, id: &str) -> RoleMappings<'a> {
        RoleMappings::new(self.scope.clone(), &["users", id])
    }

    /// Email the user a link to perform `params.actions`.
    pub async fn execute_actions_email(&self, id: &str, params: &ExecuteActionsEmail) -> Result<()> {
        let query = params.query();
        self.scope
            .execute(
                Method::PUT,
                &self.scope.realm_path(&["users", id, "execute-actions-email"]),
                |b| b.query(&query).json(&params.actions),
            )
            .await
    }

    pub async fn list_groups(
        &self,
        id: &str,
        query: &UserGroupsQuery,
    ) -> Result<Vec<GroupRepresentation>> {
        self.scope
            .get_with(&self.scope.realm_path(&["users", id, "groups"]), query)
            .await
    }

    pub async fn add_to_group(&self, id: &str, group_id: &str) -> Result<()> {
        self.scope
            .execute(
                Method::PUT,
                &self.scope.realm_path(&["users", id, "groups", group_id]),
                |b| b,
            )
            .await
    }

    pub async fn del_from_group(&self, id: &str, group_id: &str) -> Result<()> {
        self.scope
            .delete(&self.scope.realm_path(&["users", id, "groups", group_id]))
            .await
    }

    pub async fn list_federated_identities(
        &self,
        id: &str,
    ) -> Result<Vec<FederatedIdentityRepresentation>> {
        self.scope
            .get(&self.scope.realm_path(&["users", id, "federated-identity"]))
            .await
    }

    pub async fn add_federated_identity(
        &self,
        id: &str,
        provider: &str,
        identity: &FederatedIdentityRepresentation,
    ) -> Result<()> {
        self.scope
            .post(
                &self
                    .scope
                    .realm_path(&["users", id, "federated-identity", provider]),
                identity,
            )
            .await
    }

    pub async fn del_federated_identity(&self, id: &str, provider: &str) -> Result<()> {
        self.scope
            .delete(
                &self
                    .scope
                    .realm_path(&["users", id, "federated-identity", provider]),
            )
            .await
    }

    pub async fn list_credentials(&self, id: &str) -> Result<Vec<CredentialRepresentation>> {
        self.scope
            .get(&self.scope.realm_path(&["users", id, "credentials"]))
            .await
    }

    pub async fn remove_totp(&self, id: &str) -> Result<()> {
        self.scope
            .execute(
                Method::PUT,
                &self.scope.realm_path(&["users", id, "remove-totp"]),
                |b| b,
            )
            .await
    }

    pub async fn reset_password(&self, id: &str, credential: &CredentialRepresentation) -> Result<()> {
        self.scope
            .put(
                &self.scope.realm_path(&["users", id, "reset-password"]),
                credential,
            )
            .await
    }

    pub async fn send_verify_email(
        &self,
        id: &str,
        client_id: Option<&str>,
        redirect_uri: Option<&str>,
    ) -> Result<()> {
        let query = VerifyEmailQuery {
            client_id,
            redirect_uri,
        };
        self.scope
            .execute(
                Method::PUT,
                &self.scope.realm_path(&["users", id, "send-verify-email"]),
                |b| b.query(&query),
            )
            .await
    }

    pub async fn list_sessions(&self, id: &str) -> Result<Vec<UserSessionRepresentation>> {
        self.scope
            .get(&self.scope.realm_path(&["users", id, "sessions"]))
            .await
    }

    /// `client` is the client's internal uuid.
    pub async fn list_offline_sessions(
        &self,
        id: &str,
        client: &str,
    ) -> Result<Vec<UserSessionRepresentation>> {
        self.scope
            .get(
                &self
                    .scope
                    .realm_path(&["users", id, "offline-sessions", client]),
            )
            .await
    }

    /// End every session of the user.
    pub async fn logout(&self, id: &str) -> Result<()> {
        self.scope
            .execute(
                Method::POST,
                &self.scope.realm_path(&["users", id, "logout"]),
                |b| b,
            )
            .await
    }

    pub async fn list_consents(&self, id: &str) -> Result<Vec<UserConsentRepresentation>> {
        self.scope
            .get(&self.scope.realm_path(&["users", id, "consents"]))
            .await
    }

    /// `client_id` is the OAuth2 client id, not the uuid.
    pub async fn revoke_consent(&self, id: &str, client_id: &str) -> Result<()> {
        self.scope
            .delete(&self.scope.realm_path(&["users", id, "consents", client_id]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::RoleRepresentation;
    use crate::error::Error;
    use crate::resources::test_support::client;
    use keycloak_session::ConnectionConfig;
    use request_config::RequestConfig;
    use wiremock::matchers::{any, body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn find_before_auth_fails_without_request() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let client = crate::KeycloakAdminClient::new(
            ConnectionConfig::new().with_base_url(format!("{}/auth", server.uri())),
        );
        let err = client.users().find(&UserQuery::default()).await.unwrap_err();
        assert!(matches!(err, Error::NotAuthenticated));
    }

    #[tokio::test]
    async fn find_sends_search_and_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/admin/realms/master/users"))
            .and(query_param("search", "jane"))
            .and(header("authorization", "Bearer T"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "u1", "username": "jane", "enabled": true}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let users = client.users().find(&UserQuery::search("jane")).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username.as_deref(), Some("jane"));
    }

    #[tokio::test]
    async fn accessor_realm_override() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/admin/realms/demo/users/count"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(42)))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let count = client
            .users()
            .realm("demo")
            .count(&UserQuery::default())
            .await
            .unwrap();
        assert_eq!(count, 42);
        assert_eq!(client.realm_name(), "master");
    }

    #[tokio::test]
    async fn create_and_find_one() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/admin/realms/master/users"))
            .and(body_json(serde_json::json!({"username": "jdoe", "enabled": true})))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("location", "http://kc/auth/admin/realms/master/users/u-42"),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/admin/realms/master/users/u-42"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": "u-42", "username": "jdoe"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/admin/realms/master/users/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client(&server);
        let users = client.users();
        let id = users
            .create(&UserRepresentation {
                username: Some("jdoe".into()),
                enabled: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(id, "u-42");

        let user = users.find_one(&id).await.unwrap().unwrap();
        assert_eq!(user.username.as_deref(), Some("jdoe"));
        assert!(users.find_one("gone").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn realm_role_mapping_add_and_remove() {
        let server = MockServer::start().await;
        let roles = serde_json::json!([{"id": "r1", "name": "auditor"}]);
        Mock::given(method("POST"))
            .and(path("/auth/admin/realms/master/users/u1/role-mappings/realm"))
            .and(body_json(roles.clone()))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/auth/admin/realms/master/users/u1/role-mappings/realm"))
            .and(body_json(roles))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let role = RoleRepresentation {
            id: Some("r1".into()),
            name: Some("auditor".into()),
            ..Default::default()
        };
        let mappings = client.users().role_mappings("u1");
        mappings.add_realm(std::slice::from_ref(&role)).await.unwrap();
        mappings.del_realm(&[role]).await.unwrap();
    }

    #[tokio::test]
    async fn execute_actions_email_sends_query_and_actions() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/auth/admin/realms/master/users/u1/execute-actions-email"))
            .and(query_param("lifespan", "3600"))
            .and(query_param("client_id", "account"))
            .and(body_json(serde_json::json!(["UPDATE_PASSWORD"])))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        client
            .users()
            .execute_actions_email(
                "u1",
                &ExecuteActionsEmail {
                    actions: vec!["UPDATE_PASSWORD".into()],
                    client_id: Some("account".into()),
                    lifespan: Some(3600),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn group_membership_and_password_reset() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/auth/admin/realms/master/users/u1/groups/g1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/auth/admin/realms/master/users/u1/groups/g1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/auth/admin/realms/master/users/u1/reset-password"))
            .and(body_json(
                serde_json::json!({"type": "password", "value": "n3w", "temporary": false}),
            ))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let users = client.users();
        users.add_to_group("u1", "g1").await.unwrap();
        users.del_from_group("u1", "g1").await.unwrap();
        users
            .reset_password("u1", &CredentialRepresentation::password("n3w", false))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn method_config_applies_to_accessor_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/admin/realms/master/users/u1/logout"))
            .and(header("x-request-id", "abc"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        client
            .users()
            .with_config(RequestConfig::new().with_header("X-Request-Id", "abc"))
            .logout("u1")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn conflict_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(serde_json::json!({"errorMessage": "User exists with same username"})),
            )
            .mount(&server)
            .await;

        let client = client(&server);
        let err = client
            .users()
            .create(&UserRepresentation::default())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(409));
    }
}
