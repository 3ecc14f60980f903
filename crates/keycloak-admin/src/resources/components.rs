//! `/admin/realms/{realm}/components`

use crate::dto::{
    ComponentQuery, ComponentRepresentation, ComponentTypeRepresentation, SubComponentTypeQuery,
};
use crate::error::Result;

accessor!(
    /// Realm components: user storage providers, key providers and the like.
    Components
);

impl<'a> Components<'a> {
    pub async fn find(&self, query: &ComponentQuery) -> Result<Vec<ComponentRepresentation>> {
        self.scope
            .get_with(&self.scope.realm_path(&["components"]), query)
            .await
    }

    /// Returns the new component's id.
    pub async fn create(&self, component: &ComponentRepresentation) -> Result<String> {
        self.scope
            .create(&self.scope.realm_path(&["components"]), component)
            .await
    }

    pub async fn find_one(&self, id: &str) -> Result<Option<ComponentRepresentation>> {
        self.scope
            .get_optional(&self.scope.realm_path(&["components", id]))
            .await
    }

    pub async fn update(&self, id: &str, component: &ComponentRepresentation) -> Result<()> {
        self.scope
            .put(&self.scope.realm_path(&["components", id]), component)
            .await
    }

    pub async fn del(&self, id: &str) -> Result<()> {
        self.scope
            .delete(&self.scope.realm_path(&["components", id]))
            .await
    }

    /// Component types that can be created under component `id`, filtered
    /// by SPI `provider_type`.
    pub async fn list_sub_component_types(
        &self,
        id: &str,
        provider_type: &str,
    ) -> Result<Vec<ComponentTypeRepresentation>> {
        self.scope
            .get_with(
                &self.scope.realm_path(&["components", id, "sub-component-types"]),
                &SubComponentTypeQuery { provider_type },
            )
            .await
    }
}
