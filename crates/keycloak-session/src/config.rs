//! Connection settings supplied at construction

use request_config::RequestConfig;

/// Connection settings. Every field is optional; unset or empty strings fall
/// back to the defaults (`http://127.0.0.1:8080/auth`, realm `master`).
///
/// Also used as the partial update passed to `set_config`, where only
/// non-empty `base_url` / `realm_name` values are applied.
#[derive(Debug, Clone, Default)]
pub struct ConnectionConfig {
    pub base_url: Option<String>,
    pub realm_name: Option<String>,
    /// Global request overrides (lowest precedence layer)
    pub request_config: Option<RequestConfig>,
}

impl ConnectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_realm_name(mut self, realm_name: impl Into<String>) -> Self {
        self.realm_name = Some(realm_name.into());
        self
    }

    pub fn with_request_config(mut self, request_config: RequestConfig) -> Self {
        self.request_config = Some(request_config);
        self
    }

    /// `base_url` if set and non-empty.
    pub(crate) fn effective_base_url(&self) -> Option<&str> {
        self.base_url.as_deref().filter(|s| !s.is_empty())
    }

    /// `realm_name` if set and non-empty.
    pub(crate) fn effective_realm_name(&self) -> Option<&str> {
        self.realm_name.as_deref().filter(|s| !s.is_empty())
    }
}
