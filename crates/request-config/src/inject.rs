//! Applying a `RequestConfig` to an outgoing request.
//!
//! Callers name the headers they own (e.g. `Authorization` on admin calls,
//! `Content-Type` on the form-encoded token request). Overrides for those
//! names are dropped with a warning so they can never clobber the value the
//! caller sets afterwards.

use crate::RequestConfig;
use reqwest::RequestBuilder;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::str::FromStr;
use tracing::warn;

/// Build a header map from the config's headers, skipping protected and
/// invalid names/values.
pub fn to_header_map(config: &RequestConfig, protected: &[HeaderName]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (raw_name, raw_value) in config.headers() {
        let name = match HeaderName::from_str(raw_name) {
            Ok(n) => n,
            Err(e) => {
                warn!(header = %raw_name, error = %e, "skipping invalid header name");
                continue;
            }
        };
        if protected.contains(&name) {
            warn!(header = %raw_name, "refusing to override protected header");
            continue;
        }
        let value = match HeaderValue::from_str(raw_value) {
            Ok(v) => v,
            Err(e) => {
                warn!(header = %raw_name, error = %e, "skipping invalid header value");
                continue;
            }
        };
        headers.insert(name, value);
    }
    headers
}

/// Apply headers and timeout from `config` to a request builder.
pub fn apply(
    builder: RequestBuilder,
    config: &RequestConfig,
    protected: &[HeaderName],
) -> RequestBuilder {
    let builder = builder.headers(to_header_map(config, protected));
    match config.timeout() {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    }
}
