//! `/admin/serverinfo`

use crate::dto::ServerInfoRepresentation;
use crate::error::Result;

accessor!(
    /// Server-wide information. Not realm scoped.
    ServerInfo
);

impl<'a> ServerInfo<'a> {
    pub async fn find(&self) -> Result<ServerInfoRepresentation> {
        self.scope.get(&self.scope.admin_path(&["serverinfo"])).await
    }
}

#[cfg(test)]
mod tests {
    use crate::resources::test_support::client;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn find_reads_version() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/admin/serverinfo"))
            .and(header("authorization", "Bearer T"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "systemInfo": {"version": "24.0.4", "uptimeMillis": 1200},
                "memoryInfo": {"total": 512, "used": 128},
                "cryptoInfo": {"cryptoProvider": "DefaultCryptoProvider"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let info = client.server_info().realm("ignored").find().await.unwrap();
        let system = info.system_info.unwrap();
        assert_eq!(system.version.as_deref(), Some("24.0.4"));
        assert_eq!(info.memory_info.unwrap().used, Some(128));
        assert!(info.extra.contains_key("cryptoInfo"));
    }
}
