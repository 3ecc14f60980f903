//! `/admin/realms/{realm}/groups`

use super::RoleMappings;
use crate::dto::{GroupQuery, GroupRepresentation, Page, UserRepresentation};
use crate::error::Result;

accessor!(
    /// Groups of a realm.
    Groups
);

impl<'a> Groups<'a> {
    /// Top-level groups with their sub-group trees.
    pub async fn find(&self, query: &GroupQuery) -> Result<Vec<GroupRepresentation>> {
        self.scope
            .get_with(&self.scope.realm_path(&["groups"]), query)
            .await
    }

    /// Returns the new group's id.
    pub async fn create(&self, group: &GroupRepresentation) -> Result<String> {
        self.scope
            .create(&self.scope.realm_path(&["groups"]), group)
            .await
    }

    pub async fn find_one(&self, id: &str) -> Result<Option<GroupRepresentation>> {
        self.scope
            .get_optional(&self.scope.realm_path(&["groups", id]))
            .await
    }

    pub async fn update(&self, id: &str, group: &GroupRepresentation) -> Result<()> {
        self.scope
            .put(&self.scope.realm_path(&["groups", id]), group)
            .await
    }

    pub async fn del(&self, id: &str) -> Result<()> {
        self.scope
            .delete(&self.scope.realm_path(&["groups", id]))
            .await
    }

    /// Create a child group, or move an existing group (when `child.id` is
    /// set) under `parent_id`. Returns the child's id.
    pub async fn set_or_create_child(
        &self,
        parent_id: &str,
        child: &GroupRepresentation,
    ) -> Result<String> {
        let path = self.scope.realm_path(&["groups", parent_id, "children"]);
        match &child.id {
            Some(id) => {
                self.scope.post(&path, child).await?;
                Ok(id.clone())
            }
            None => self.scope.create(&path, child).await,
        }
    }

    pub async fn list_members(&self, id: &str, page: Page) -> Result<Vec<UserRepresentation>> {
        self.scope
            .get_with(&self.scope.realm_path(&["groups", id, "members"]), &page)
            .await
    }

    pub fn role_mappings(&self, id: &str) -> RoleMappings<'a> {
        RoleMappings::new(self.scope.clone(), &["groups", id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::test_support::client;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn create_child_returns_location_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/admin/realms/master/groups/g1/children"))
            .and(body_json(serde_json::json!({"name": "platform"})))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("location", "http://kc/auth/admin/realms/master/groups/g2"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let id = client
            .groups()
            .set_or_create_child("g1", &GroupRepresentation::named("platform"))
            .await
            .unwrap();
        assert_eq!(id, "g2");
    }

    #[tokio::test]
    async fn moving_existing_group_keeps_its_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/admin/realms/master/groups/g1/children"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let child = GroupRepresentation {
            id: Some("g9".into()),
            ..GroupRepresentation::named("ops")
        };
        let id = client
            .groups()
            .set_or_create_child("g1", &child)
            .await
            .unwrap();
        assert_eq!(id, "g9");
    }

    #[tokio::test]
    async fn members_are_paginated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/admin/realms/master/groups/g1/members"))
            .and(query_param("first", "10"))
            .and(query_param("max", "5"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([{"username": "a"}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let members = client
            .groups()
            .list_members("g1", Page::new(10, 5))
            .await
            .unwrap();
        assert_eq!(members[0].username.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn client_role_mappings_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(
                "/auth/admin/realms/master/groups/g1/role-mappings/clients/c-uuid/available",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let roles = client
            .groups()
            .role_mappings("g1")
            .list_available_client("c-uuid")
            .await
            .unwrap();
        assert!(roles.is_empty());
    }
}
