//! Transport overrides for outgoing admin and token requests
//!
//! A `RequestConfig` carries the caller-tunable part of an HTTP request:
//! extra headers and a timeout. Configs are layered, lowest precedence first:
//!
//! 1. global overrides (from `ConnectionConfig`)
//! 2. realm defaults (registered per realm on the client)
//! 3. method-level overrides (set on a resource accessor)
//!
//! Header names compare case-insensitively. A higher layer replaces a lower
//! layer's value for the same header; a timeout set by a higher layer wins.

pub mod inject;

pub use inject::{apply, to_header_map};

use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestConfig {
    /// Header name (lowercased) to value
    headers: BTreeMap<String, String>,
    timeout: Option<Duration>,
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a header. Names are stored lowercased.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    pub fn set_header(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.timeout.is_none()
    }

    /// Overlay `higher` on top of `self`, returning the merged config.
    pub fn merged(&self, higher: &RequestConfig) -> RequestConfig {
        let mut headers = self.headers.clone();
        for (name, value) in &higher.headers {
            headers.insert(name.clone(), value.clone());
        }
        RequestConfig {
            headers,
            timeout: higher.timeout.or(self.timeout),
        }
    }

    /// Merge the global, realm and method layers. Absent layers are skipped.
    pub fn layered(
        global: Option<&RequestConfig>,
        realm: Option<&RequestConfig>,
        method: Option<&RequestConfig>,
    ) -> RequestConfig {
        [global, realm, method]
            .into_iter()
            .flatten()
            .fold(RequestConfig::default(), |acc, layer| acc.merged(layer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names_are_case_insensitive() {
        let config = RequestConfig::new().with_header("X-Tenant", "acme");
        assert_eq!(config.header("x-tenant"), Some("acme"));
        assert_eq!(config.header("X-TENANT"), Some("acme"));
    }

    #[test]
    fn method_beats_realm_beats_global() {
        let global = RequestConfig::new()
            .with_header("x-trace", "global")
            .with_header("x-global-only", "g");
        let realm = RequestConfig::new()
            .with_header("X-Trace", "realm")
            .with_header("x-realm-only", "r");
        let method = RequestConfig::new().with_header("x-TRACE", "method");

        let merged = RequestConfig::layered(Some(&global), Some(&realm), Some(&method));
        assert_eq!(merged.header("x-trace"), Some("method"));
        assert_eq!(merged.header("x-global-only"), Some("g"));
        assert_eq!(merged.header("x-realm-only"), Some("r"));

        let without_method = RequestConfig::layered(Some(&global), Some(&realm), None);
        assert_eq!(without_method.header("x-trace"), Some("realm"));

        let global_only = RequestConfig::layered(Some(&global), None, None);
        assert_eq!(global_only.header("x-trace"), Some("global"));
    }

    #[test]
    fn timeout_taken_from_highest_layer_that_sets_one() {
        let global = RequestConfig::new().with_timeout(Duration::from_secs(30));
        let realm = RequestConfig::new();
        let method = RequestConfig::new().with_timeout(Duration::from_secs(5));

        let merged = RequestConfig::layered(Some(&global), Some(&realm), None);
        assert_eq!(merged.timeout(), Some(Duration::from_secs(30)));

        let merged = RequestConfig::layered(Some(&global), Some(&realm), Some(&method));
        assert_eq!(merged.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn no_layers_is_empty() {
        assert!(RequestConfig::layered(None, None, None).is_empty());
    }
}
