//! `/admin/realms`
//!
//! Realm operations name their target realm explicitly; the client's current
//! realm is not used.

use reqwest::Method;

use crate::dto::{
    AdminEventQuery, AdminEventRepresentation, EventQuery, EventRepresentation, ExportQuery,
    GroupRepresentation, PartialImportRepresentation, PartialImportResult,
    RealmEventsConfigRepresentation, RealmRepresentation,
};
use crate::error::Result;
use crate::resource::location_id;

accessor!(
    /// Realm administration.
    Realms
);

impl<'a> Realms<'a> {
    fn path(&self, realm: &str, rest: &[&str]) -> Vec<String> {
        let mut segments = vec!["realms", realm];
        segments.extend_from_slice(rest);
        self.scope.admin_path(&segments)
    }

    pub async fn find(&self) -> Result<Vec<RealmRepresentation>> {
        self.scope.get(&self.scope.admin_path(&["realms"])).await
    }

    /// Returns the created realm's name.
    pub async fn create(&self, realm: &RealmRepresentation) -> Result<String> {
        let response = self
            .scope
            .send(Method::POST, &self.scope.admin_path(&["realms"]), |b| {
                b.json(realm)
            })
            .await?;
        match &realm.realm {
            Some(name) => Ok(name.clone()),
            None => location_id(&response),
        }
    }

    pub async fn find_one(&self, realm: &str) -> Result<Option<RealmRepresentation>> {
        self.scope.get_optional(&self.path(realm, &[])).await
    }

    pub async fn update(&self, realm: &str, representation: &RealmRepresentation) -> Result<()> {
        self.scope.put(&self.path(realm, &[]), representation).await
    }

    pub async fn del(&self, realm: &str) -> Result<()> {
        self.scope.delete(&self.path(realm, &[])).await
    }

    pub async fn partial_import(
        &self,
        realm: &str,
        import: &PartialImportRepresentation,
    ) -> Result<PartialImportResult> {
        self.scope
            .request(Method::POST, &self.path(realm, &["partialImport"]), |b| {
                b.json(import)
            })
            .await
    }

    /// Export the realm. Secrets are masked by the server.
    pub async fn export(&self, realm: &str, query: ExportQuery) -> Result<RealmRepresentation> {
        self.scope
            .request(Method::POST, &self.path(realm, &["partial-export"]), |b| {
                b.query(&query)
            })
            .await
    }

    pub async fn find_events(
        &self,
        realm: &str,
        query: &EventQuery,
    ) -> Result<Vec<EventRepresentation>> {
        self.scope
            .get_with(&self.path(realm, &["events"]), query)
            .await
    }

    pub async fn clear_events(&self, realm: &str) -> Result<()> {
        self.scope.delete(&self.path(realm, &["events"])).await
    }

    pub async fn find_admin_events(
        &self,
        realm: &str,
        query: &AdminEventQuery,
    ) -> Result<Vec<AdminEventRepresentation>> {
        self.scope
            .get_with(&self.path(realm, &["admin-events"]), query)
            .await
    }

    pub async fn clear_admin_events(&self, realm: &str) -> Result<()> {
        self.scope.delete(&self.path(realm, &["admin-events"])).await
    }

    pub async fn get_events_config(&self, realm: &str) -> Result<RealmEventsConfigRepresentation> {
        self.scope.get(&self.path(realm, &["events", "config"])).await
    }

    pub async fn update_events_config(
        &self,
        realm: &str,
        config: &RealmEventsConfigRepresentation,
    ) -> Result<()> {
        self.scope
            .put(&self.path(realm, &["events", "config"]), config)
            .await
    }

    /// End every user session in the realm.
    pub async fn logout_all(&self, realm: &str) -> Result<()> {
        self.scope
            .execute(Method::POST, &self.path(realm, &["logout-all"]), |b| b)
            .await
    }

    pub async fn remove_session(&self, realm: &str, session_id: &str) -> Result<()> {
        self.scope
            .delete(&self.path(realm, &["sessions", session_id]))
            .await
    }

    pub async fn get_default_groups(&self, realm: &str) -> Result<Vec<GroupRepresentation>> {
        self.scope.get(&self.path(realm, &["default-groups"])).await
    }

    pub async fn add_default_group(&self, realm: &str, group_id: &str) -> Result<()> {
        self.scope
            .execute(
                Method::PUT,
                &self.path(realm, &["default-groups", group_id]),
                |b| b,
            )
            .await
    }

    pub async fn remove_default_group(&self, realm: &str, group_id: &str) -> Result<()> {
        self.scope
            .delete(&self.path(realm, &["default-groups", group_id]))
            .await
    }
}
