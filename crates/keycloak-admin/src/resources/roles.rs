//! `/admin/realms/{realm}/roles` and `/admin/realms/{realm}/roles-by-id`

use crate::dto::{RoleRepresentation, RoleUsersQuery, UserRepresentation};
use crate::error::Result;

accessor!(
    /// Realm roles, addressed by name or by id.
    Roles
);

impl<'a> Roles<'a> {
    pub async fn find(&self) -> Result<Vec<RoleRepresentation>> {
        self.scope.get(&self.scope.realm_path(&["roles"])).await
    }

    /// Returns the role name from the `Location` header.
    pub async fn create(&self, role: &RoleRepresentation) -> Result<String> {
        self.scope
            .create(&self.scope.realm_path(&["roles"]), role)
            .await
    }

    pub async fn find_one_by_name(&self, name: &str) -> Result<Option<RoleRepresentation>> {
        self.scope
            .get_optional(&self.scope.realm_path(&["roles", name]))
            .await
    }

    pub async fn update_by_name(&self, name: &str, role: &RoleRepresentation) -> Result<()> {
        self.scope
            .put(&self.scope.realm_path(&["roles", name]), role)
            .await
    }

    pub async fn del_by_name(&self, name: &str) -> Result<()> {
        self.scope
            .delete(&self.scope.realm_path(&["roles", name]))
            .await
    }

    /// Users holding the role directly.
    pub async fn find_users_with_role(
        &self,
        name: &str,
        query: &RoleUsersQuery,
    ) -> Result<Vec<UserRepresentation>> {
        self.scope
            .get_with(&self.scope.realm_path(&["roles", name, "users"]), query)
            .await
    }

    pub async fn find_one_by_id(&self, id: &str) -> Result<Option<RoleRepresentation>> {
        self.scope
            .get_optional(&self.scope.realm_path(&["roles-by-id", id]))
            .await
    }

    pub async fn update_by_id(&self, id: &str, role: &RoleRepresentation) -> Result<()> {
        self.scope
            .put(&self.scope.realm_path(&["roles-by-id", id]), role)
            .await
    }

    pub async fn del_by_id(&self, id: &str) -> Result<()> {
        self.scope
            .delete(&self.scope.realm_path(&["roles-by-id", id]))
            .await
    }
}
