//! `/admin/realms/{realm}/authentication`
//!
//! Flows are addressed by id for CRUD but by alias for their executions and
//! for copying. Required actions are addressed by alias.

use std::collections::HashMap;

use reqwest::Method;
use serde_json::json;

use crate::dto::{
    AuthenticationExecutionInfoRepresentation, AuthenticationFlowRepresentation,
    AuthenticatorConfigInfoRepresentation, AuthenticatorProviderRepresentation, NewSubFlow,
    RequiredActionProviderRepresentation, RequiredActionProviderSimpleRepresentation,
};
use crate::error::Result;

accessor!(
    /// Authentication flows, executions and required actions.
    AuthenticationManagement
);

impl<'a> AuthenticationManagement<'a> {
    fn path(&self, rest: &[&str]) -> Vec<String> {
        let mut segments = vec!["authentication"];
        segments.extend_from_slice(rest);
        self.scope.realm_path(&segments)
    }

    // Required actions

    /// Register a required action provider that is deployed but not yet
    /// registered with the realm.
    pub async fn register_required_action(
        &self,
        action: &RequiredActionProviderSimpleRepresentation,
    ) -> Result<()> {
        self.scope
            .post(&self.path(&["register-required-action"]), action)
            .await
    }

    pub async fn get_unregistered_required_actions(
        &self,
    ) -> Result<Vec<RequiredActionProviderSimpleRepresentation>> {
        self.scope
            .get(&self.path(&["unregistered-required-actions"]))
            .await
    }

    pub async fn get_required_actions(&self) -> Result<Vec<RequiredActionProviderRepresentation>> {
        self.scope.get(&self.path(&["required-actions"])).await
    }

    pub async fn get_required_action_for_alias(
        &self,
        alias: &str,
    ) -> Result<Option<RequiredActionProviderRepresentation>> {
        self.scope
            .get_optional(&self.path(&["required-actions", alias]))
            .await
    }

    pub async fn update_required_action(
        &self,
        alias: &str,
        action: &RequiredActionProviderRepresentation,
    ) -> Result<()> {
        self.scope
            .put(&self.path(&["required-actions", alias]), action)
            .await
    }

    pub async fn delete_required_action(&self, alias: &str) -> Result<()> {
        self.scope
            .delete(&self.path(&["required-actions", alias]))
            .await
    }

    pub async fn raise_required_action_priority(&self, alias: &str) -> Result<()> {
        self.scope
            .execute(
                Method::POST,
                &self.path(&["required-actions", alias, "raise-priority"]),
                |b| b,
            )
            .await
    }

    pub async fn lower_required_action_priority(&self, alias: &str) -> Result<()> {
        self.scope
            .execute(
                Method::POST,
                &self.path(&["required-actions", alias, "lower-priority"]),
                |b| b,
            )
            .await
    }

    // Flows

    pub async fn get_flows(&self) -> Result<Vec<AuthenticationFlowRepresentation>> {
        self.scope.get(&self.path(&["flows"])).await
    }

    pub async fn get_flow(&self, id: &str) -> Result<Option<AuthenticationFlowRepresentation>> {
        self.scope.get_optional(&self.path(&["flows", id])).await
    }

    /// Returns the new flow's id.
    pub async fn create_flow(&self, flow: &AuthenticationFlowRepresentation) -> Result<String> {
        self.scope.create(&self.path(&["flows"]), flow).await
    }

    pub async fn update_flow(
        &self,
        id: &str,
        flow: &AuthenticationFlowRepresentation,
    ) -> Result<()> {
        self.scope.put(&self.path(&["flows", id]), flow).await
    }

    pub async fn delete_flow(&self, id: &str) -> Result<()> {
        self.scope.delete(&self.path(&["flows", id])).await
    }

    /// Copy the flow named `alias` under `new_name`.
    pub async fn copy_flow(&self, alias: &str, new_name: &str) -> Result<()> {
        self.scope
            .post(
                &self.path(&["flows", alias, "copy"]),
                &json!({ "newName": new_name }),
            )
            .await
    }

    // Executions

    pub async fn get_executions(
        &self,
        flow_alias: &str,
    ) -> Result<Vec<AuthenticationExecutionInfoRepresentation>> {
        self.scope
            .get(&self.path(&["flows", flow_alias, "executions"]))
            .await
    }

    /// Update an execution's requirement; the server matches it by id.
    pub async fn update_execution(
        &self,
        flow_alias: &str,
        execution: &AuthenticationExecutionInfoRepresentation,
    ) -> Result<()> {
        self.scope
            .put(&self.path(&["flows", flow_alias, "executions"]), execution)
            .await
    }

    /// Add an authenticator execution to the flow. Returns the execution id.
    pub async fn add_execution_to_flow(&self, flow_alias: &str, provider: &str) -> Result<String> {
        self.scope
            .create(
                &self.path(&["flows", flow_alias, "executions", "execution"]),
                &json!({ "provider": provider }),
            )
            .await
    }

    /// Add a nested flow to the flow. Returns the new flow's id.
    pub async fn add_flow_to_flow(&self, flow_alias: &str, flow: &NewSubFlow) -> Result<String> {
        self.scope
            .create(&self.path(&["flows", flow_alias, "executions", "flow"]), flow)
            .await
    }

    pub async fn del_execution(&self, id: &str) -> Result<()> {
        self.scope.delete(&self.path(&["executions", id])).await
    }

    pub async fn raise_priority_execution(&self, id: &str) -> Result<()> {
        self.scope
            .execute(
                Method::POST,
                &self.path(&["executions", id, "raise-priority"]),
                |b| b,
            )
            .await
    }

    pub async fn lower_priority_execution(&self, id: &str) -> Result<()> {
        self.scope
            .execute(
                Method::POST,
                &self.path(&["executions", id, "lower-priority"]),
                |b| b,
            )
            .await
    }

    // Providers

    pub async fn get_authenticator_providers(
        &self,
    ) -> Result<Vec<AuthenticatorProviderRepresentation>> {
        self.scope.get(&self.path(&["authenticator-providers"])).await
    }

    pub async fn get_client_authenticator_providers(
        &self,
    ) -> Result<Vec<AuthenticatorProviderRepresentation>> {
        self.scope
            .get(&self.path(&["client-authenticator-providers"]))
            .await
    }

    pub async fn get_form_action_providers(
        &self,
    ) -> Result<Vec<AuthenticatorProviderRepresentation>> {
        self.scope.get(&self.path(&["form-action-providers"])).await
    }

    /// Configuration properties accepted by an authenticator.
    pub async fn get_config_description(
        &self,
        provider_id: &str,
    ) -> Result<AuthenticatorConfigInfoRepresentation> {
        self.scope
            .get(&self.path(&["config-description", provider_id]))
            .await
    }

    /// Authenticator config instance attached to an execution.
    pub async fn get_config(&self, id: &str) -> Result<Option<HashMap<String, serde_json::Value>>> {
        self.scope.get_optional(&self.path(&["config", id])).await
    }

    pub async fn del_config(&self, id: &str) -> Result<()> {
        self.scope.delete(&self.path(&["config", id])).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::test_support::client;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn copy_flow_sends_new_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/admin/realms/master/authentication/flows/browser/copy"))
            .and(body_json(serde_json::json!({"newName": "browser-otp"})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        client
            .authentication_management()
            .copy_flow("browser", "browser-otp")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn add_execution_returns_location_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(
                "/auth/admin/realms/master/authentication/flows/browser%20otp/executions/execution",
            ))
            .and(body_json(serde_json::json!({"provider": "auth-otp-form"})))
            .respond_with(ResponseTemplate::new(201).insert_header(
                "location",
                "http://kc/auth/admin/realms/master/authentication/executions/e42",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let id = client
            .authentication_management()
            .add_execution_to_flow("browser otp", "auth-otp-form")
            .await
            .unwrap();
        assert_eq!(id, "e42");
    }

    #[tokio::test]
    async fn required_action_priority_and_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(
                "/auth/admin/realms/master/authentication/required-actions/CONFIGURE_TOTP/raise-priority",
            ))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(
                "/auth/admin/realms/master/authentication/required-actions/UNKNOWN",
            ))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client(&server);
        let auth = client.authentication_management();
        auth.raise_required_action_priority("CONFIGURE_TOTP")
            .await
            .unwrap();
        assert!(
            auth.get_required_action_for_alias("UNKNOWN")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn executions_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(
                "/auth/admin/realms/master/authentication/flows/browser/executions",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "e1", "providerId": "auth-cookie", "requirement": "ALTERNATIVE", "level": 0, "index": 0}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let executions = client
            .authentication_management()
            .get_executions("browser")
            .await
            .unwrap();
        assert_eq!(executions[0].requirement.as_deref(), Some("ALTERNATIVE"));
    }
}
