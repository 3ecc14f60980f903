//! `/admin/realms/{realm}/clients`
//!
//! Paths take the client's internal uuid (`ClientRepresentation::id`), not
//! its OAuth2 client id. Use `find(&ClientQuery::client_id(..))` to look the
//! uuid up.

use reqwest::Method;

use super::ProtocolMappers;
use crate::dto::{
    ClientQuery, ClientRepresentation, ClientScopeRef, Count, CredentialRepresentation, Page,
    RoleRepresentation, RoleUsersQuery, UserRepresentation, UserSessionRepresentation,
};
use crate::error::Result;

accessor!(
    /// Clients of a realm.
    Clients
);

impl<'a> Clients<'a> {
    pub async fn find(&self, query: &ClientQuery) -> Result<Vec<ClientRepresentation>> {
        self.scope
            .get_with(&self.scope.realm_path(&["clients"]), query)
            .await
    }

    /// Returns the new client's uuid.
    pub async fn create(&self, client: &ClientRepresentation) -> Result<String> {
        self.scope
            .create(&self.scope.realm_path(&["clients"]), client)
            .await
    }

    pub async fn find_one(&self, id: &str) -> Result<Option<ClientRepresentation>> {
        self.scope
            .get_optional(&self.scope.realm_path(&["clients", id]))
            .await
    }

    pub async fn update(&self, id: &str, client: &ClientRepresentation) -> Result<()> {
        self.scope
            .put(&self.scope.realm_path(&["clients", id]), client)
            .await
    }

    pub async fn del(&self, id: &str) -> Result<()> {
        self.scope
            .delete(&self.scope.realm_path(&["clients", id]))
            .await
    }

    /// Returns the role name.
    pub async fn create_role(&self, id: &str, role: &RoleRepresentation) -> Result<String> {
        self.scope
            .create(&self.scope.realm_path(&["clients", id, "roles"]), role)
            .await
    }

    pub async fn list_roles(&self, id: &str) -> Result<Vec<RoleRepresentation>> {
        self.scope
            .get(&self.scope.realm_path(&["clients", id, "roles"]))
            .await
    }

    pub async fn find_role(&self, id: &str, role: &str) -> Result<Option<RoleRepresentation>> {
        self.scope
            .get_optional(&self.scope.realm_path(&["clients", id, "roles", role]))
            .await
    }

    pub async fn update_role(
        &self,
        id: &str,
        role_name: &str,
        role: &RoleRepresentation,
    ) -> Result<()> {
        self.scope
            .put(
                &self.scope.realm_path(&["clients", id, "roles", role_name]),
                role,
            )
            .await
    }

    pub async fn del_role(&self, id: &str, role: &str) -> Result<()> {
        self.scope
            .delete(&self.scope.realm_path(&["clients", id, "roles", role]))
            .await
    }

    pub async fn find_users_with_role(
        &self,
        id: &str,
        role: &str,
        query: &RoleUsersQuery,
    ) -> Result<Vec<UserRepresentation>> {
        self.scope
            .get_with(
                &self.scope.realm_path(&["clients", id, "roles", role, "users"]),
                query,
            )
            .await
    }

    /// The user backing a client with service accounts enabled.
    pub async fn get_service_account_user(&self, id: &str) -> Result<UserRepresentation> {
        self.scope
            .get(&self.scope.realm_path(&["clients", id, "service-account-user"]))
            .await
    }

    pub async fn get_client_secret(&self, id: &str) -> Result<CredentialRepresentation> {
        self.scope
            .get(&self.scope.realm_path(&["clients", id, "client-secret"]))
            .await
    }

    /// Rotate the client secret and return the new one.
    pub async fn generate_new_client_secret(&self, id: &str) -> Result<CredentialRepresentation> {
        self.scope
            .request(
                Method::POST,
                &self.scope.realm_path(&["clients", id, "client-secret"]),
                |b| b,
            )
            .await
    }

    pub async fn list_default_client_scopes(&self, id: &str) -> Result<Vec<ClientScopeRef>> {
        self.scope
            .get(&self.scope.realm_path(&["clients", id, "default-client-scopes"]))
            .await
    }

    pub async fn add_default_client_scope(&self, id: &str, scope_id: &str) -> Result<()> {
        self.scope
            .execute(
                Method::PUT,
                &self
                    .scope
                    .realm_path(&["clients", id, "default-client-scopes", scope_id]),
                |b| b,
            )
            .await
    }

    pub async fn del_default_client_scope(&self, id: &str, scope_id: &str) -> Result<()> {
        self.scope
            .delete(
                &self
                    .scope
                    .realm_path(&["clients", id, "default-client-scopes", scope_id]),
            )
            .await
    }

    pub async fn list_optional_client_scopes(&self, id: &str) -> Result<Vec<ClientScopeRef>> {
        self.scope
            .get(&self.scope.realm_path(&["clients", id, "optional-client-scopes"]))
            .await
    }

    pub async fn add_optional_client_scope(&self, id: &str, scope_id: &str) -> Result<()> {
        self.scope
            .execute(
                Method::PUT,
                &self
                    .scope
                    .realm_path(&["clients", id, "optional-client-scopes", scope_id]),
                |b| b,
            )
            .await
    }

    pub async fn del_optional_client_scope(&self, id: &str, scope_id: &str) -> Result<()> {
        self.scope
            .delete(
                &self
                    .scope
                    .realm_path(&["clients", id, "optional-client-scopes", scope_id]),
            )
            .await
    }

    pub fn protocol_mappers(&self, id: &str) -> ProtocolMappers<'a> {
        ProtocolMappers::new(self.scope.clone(), &["clients", id])
    }

    /// Realm roles in the client's scope.
    pub async fn list_realm_scope_mappings(&self, id: &str) -> Result<Vec<RoleRepresentation>> {
        self.scope
            .get(&self.scope.realm_path(&["clients", id, "scope-mappings", "realm"]))
            .await
    }

    pub async fn add_realm_scope_mappings(
        &self,
        id: &str,
        roles: &[RoleRepresentation],
    ) -> Result<()> {
        self.scope
            .post(
                &self.scope.realm_path(&["clients", id, "scope-mappings", "realm"]),
                roles,
            )
            .await
    }

    pub async fn del_realm_scope_mappings(
        &self,
        id: &str,
        roles: &[RoleRepresentation],
    ) -> Result<()> {
        self.scope
            .delete_with(
                &self.scope.realm_path(&["clients", id, "scope-mappings", "realm"]),
                roles,
            )
            .await
    }

    pub async fn list_sessions(&self, id: &str, page: Page) -> Result<Vec<UserSessionRepresentation>> {
        self.scope
            .get_with(&self.scope.realm_path(&["clients", id, "user-sessions"]), &page)
            .await
    }

    pub async fn list_offline_sessions(
        &self,
        id: &str,
        page: Page,
    ) -> Result<Vec<UserSessionRepresentation>> {
        self.scope
            .get_with(
                &self.scope.realm_path(&["clients", id, "offline-sessions"]),
                &page,
            )
            .await
    }

    pub async fn get_session_count(&self, id: &str) -> Result<u64> {
        let count: Count = self
            .scope
            .get(&self.scope.realm_path(&["clients", id, "session-count"]))
            .await?;
        Ok(count.count)
    }

    pub async fn get_offline_session_count(&self, id: &str) -> Result<u64> {
        let count: Count = self
            .scope
            .get(&self.scope.realm_path(&["clients", id, "offline-session-count"]))
            .await?;
        Ok(count.count)
    }
}
