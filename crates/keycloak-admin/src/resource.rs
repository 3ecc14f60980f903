//! Request plumbing shared by every resource accessor
//!
//! A `Scope` reads the facade at call time: the bearer token, base URL,
//! realm and request overrides are never cached between calls. Each request
//! goes through the same steps:
//!
//! 1. resolve the token (missing token fails before any I/O)
//! 2. build the URL from percent-encoded path segments
//! 3. layer global, realm and method overrides and apply them
//! 4. set `Authorization: Bearer`
//! 5. map non-2xx responses to `Error::Api`

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, LOCATION};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use request_config::RequestConfig;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::client::KeycloakAdminClient;
use crate::error::{Error, Result};

/// Headers owned by the client that overrides may not replace.
const PROTECTED_HEADERS: [reqwest::header::HeaderName; 2] = [AUTHORIZATION, CONTENT_TYPE];

#[derive(Clone)]
pub(crate) struct Scope<'a> {
    client: &'a KeycloakAdminClient,
    realm: Option<String>,
    config: Option<RequestConfig>,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(client: &'a KeycloakAdminClient) -> Self {
        Self {
            client,
            realm: None,
            config: None,
        }
    }

    pub(crate) fn set_realm(&mut self, realm: String) {
        self.realm = Some(realm);
    }

    pub(crate) fn set_config(&mut self, config: RequestConfig) {
        self.config = Some(config);
    }

    /// Target realm: the accessor override, else the client's realm.
    pub(crate) fn realm_name(&self) -> &str {
        self.realm
            .as_deref()
            .unwrap_or_else(|| self.client.realm_name())
    }

    /// `admin/realms/{realm}/{rest...}`
    pub(crate) fn realm_path(&self, rest: &[&str]) -> Vec<String> {
        let mut path = vec![
            "admin".to_string(),
            "realms".to_string(),
            self.realm_name().to_string(),
        ];
        path.extend(rest.iter().map(|s| s.to_string()));
        path
    }

    /// `admin/{rest...}`
    pub(crate) fn admin_path(&self, rest: &[&str]) -> Vec<String> {
        let mut path = vec!["admin".to_string()];
        path.extend(rest.iter().map(|s| s.to_string()));
        path
    }

    fn url(&self, path: &[String]) -> Result<Url> {
        let base = self.client.base_url();
        let mut url =
            Url::parse(base).map_err(|e| Error::InvalidUrl(format!("{base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(format!("{base}: cannot be a base url")))?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }

    fn effective_config(&self) -> RequestConfig {
        RequestConfig::layered(
            self.client.get_request_config(),
            self.client.realm_request_config(self.realm_name()),
            self.config.as_ref(),
        )
    }

    /// Send a request and return the raw response, whatever its status.
    async fn dispatch(
        &self,
        method: Method,
        path: &[String],
        prepare: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response> {
        let token = self
            .client
            .get_access_token()
            .await
            .ok_or(Error::NotAuthenticated)?;
        let url = self.url(path)?;
        debug!(method = %method, path = %url.path(), realm = %self.realm_name(), "admin request");

        let builder = self.client.http().request(method.clone(), url.clone());
        let builder =
            request_config::apply(builder, &self.effective_config(), &PROTECTED_HEADERS);
        let builder = prepare(builder.bearer_auth(token));

        builder
            .send()
            .await
            .map_err(|e| Error::Transport(format!("{method} {url}: {e}")))
    }

    /// Send a request and fail on any non-2xx status.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &[String],
        prepare: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response> {
        let response = self.dispatch(method.clone(), path, prepare).await?;
        check_status(&method, response).await
    }

    /// Send a request and decode the JSON body.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &[String],
        prepare: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<T> {
        let response = self.send(method, path, prepare).await?;
        decode(response).await
    }

    /// Send a request and discard the body.
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: &[String],
        prepare: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<()> {
        self.send(method, path, prepare).await?;
        Ok(())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &[String]) -> Result<T> {
        self.request(Method::GET, path, |b| b).await
    }

    pub(crate) async fn get_with<T, Q>(&self, path: &[String], query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.request(Method::GET, path, |b| b.query(query)).await
    }

    /// GET that maps 404 to `None`.
    pub(crate) async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &[String],
    ) -> Result<Option<T>> {
        let response = self.dispatch(Method::GET, path, |b| b).await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(path = %response.url().path(), "resource not found");
            return Ok(None);
        }
        let response = check_status(&Method::GET, response).await?;
        decode(response).await.map(Some)
    }

    pub(crate) async fn post<B: Serialize + ?Sized>(&self, path: &[String], body: &B) -> Result<()> {
        self.execute(Method::POST, path, |b| b.json(body)).await
    }

    pub(crate) async fn put<B: Serialize + ?Sized>(&self, path: &[String], body: &B) -> Result<()> {
        self.execute(Method::PUT, path, |b| b.json(body)).await
    }

    pub(crate) async fn delete(&self, path: &[String]) -> Result<()> {
        self.execute(Method::DELETE, path, |b| b).await
    }

    /// DELETE carrying a JSON body (role mapping removal).
    pub(crate) async fn delete_with<B: Serialize + ?Sized>(
        &self,
        path: &[String],
        body: &B,
    ) -> Result<()> {
        self.execute(Method::DELETE, path, |b| b.json(body)).await
    }

    /// POST a new resource and return the id from the `Location` header.
    pub(crate) async fn create<B: Serialize + ?Sized>(
        &self,
        path: &[String],
        body: &B,
    ) -> Result<String> {
        let response = self.send(Method::POST, path, |b| b.json(body)).await?;
        location_id(&response)
    }
}

/// `base` followed by `rest`.
pub(crate) fn join(base: &[String], rest: &[&str]) -> Vec<String> {
    let mut path = base.to_vec();
    path.extend(rest.iter().map(|s| s.to_string()));
    path
}

async fn check_status(method: &Method, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let path = response.url().path().to_string();
    let body = response.text().await.map_err(|e| {
        warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            error = %e,
            "failed to read error response"
        );
        Error::Transport(format!("reading {status} response from {path}: {e}"))
    })?;
    warn!(method = %method, path = %path, status = status.as_u16(), "admin API request failed");
    Err(Error::Api {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let url = response.url().clone();
    let body = response
        .text()
        .await
        .map_err(|e| Error::Transport(format!("reading response from {url}: {e}")))?;
    serde_json::from_str(&body).map_err(|e| Error::Decode(format!("{}: {e}", url.path())))
}

/// Last path segment of the `Location` header.
pub(crate) fn location_id(response: &Response) -> Result<String> {
    let location = response
        .headers()
        .get(LOCATION)
        .ok_or_else(|| Error::Decode("create response has no Location header".into()))?
        .to_str()
        .map_err(|e| Error::Decode(format!("Location header: {e}")))?;
    location
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::Decode(format!("no id in Location header: {location}")))
}
