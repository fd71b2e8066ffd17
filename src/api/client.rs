//! HTTP client for the proxy-core controller.
//!
//! # Responsibilities
//! - Build authenticated requests from a `Server` descriptor
//! - Classify responses strictly by status (200..=299 is success)
//! - Decode JSON bodies into typed values

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::api::error::{ApiError, ApiResult};
use crate::api::types::{ConfigSnapshot, PendingEdit};
use crate::rules::types::{Rule, RuleProvider, RuleProvidersResponse, RulesResponse};
use crate::server::Server;

/// Characters escaped in a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Stateless controller client; cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct ControllerClient {
    http: Client,
}

impl ControllerClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured `reqwest` client (TLS options, user agent).
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }

    /// Build a request carrying the bearer token and JSON content type.
    pub fn request(&self, method: Method, server: &Server, path: &str) -> ApiResult<RequestBuilder> {
        let url = server.endpoint(path).map_err(|source| ApiError::InvalidUrl {
            url: format!("{}://{}:{}/{}", server.scheme(), server.host, server.port, path),
            source,
        })?;

        let auth = HeaderValue::from_str(&format!("Bearer {}", server.secret))
            .map_err(|_| ApiError::InvalidSecret)?;

        tracing::debug!(method = %method, url = %url, "Building controller request");

        Ok(self
            .http
            .request(method, url)
            .header(AUTHORIZATION, auth)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json")))
    }

    /// Send a request and return the body of a 2xx response.
    pub async fn execute(&self, request: RequestBuilder) -> ApiResult<String> {
        let resp = request.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }

    /// `GET path` decoded as `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, server: &Server, path: &str) -> ApiResult<T> {
        let request = self.request(Method::GET, server, path)?;
        let text = self.execute(request).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Send `body` as JSON, discarding the response body.
    pub async fn send_json(
        &self,
        method: Method,
        server: &Server,
        path: &str,
        body: &Value,
    ) -> ApiResult<()> {
        let request = self.request(method, server, path)?.json(body);
        self.execute(request).await?;
        Ok(())
    }

    /// `GET /configs`.
    pub async fn get_configs(&self, server: &Server) -> ApiResult<ConfigSnapshot> {
        self.get_json(server, "configs").await
    }

    /// `PATCH /configs` with a single-key body.
    pub async fn patch_configs(&self, server: &Server, edit: &PendingEdit) -> ApiResult<()> {
        self.send_json(Method::PATCH, server, "configs", &edit.body())
            .await
    }

    /// `GET /rules`.
    pub async fn get_rules(&self, server: &Server) -> ApiResult<Vec<Rule>> {
        let resp: RulesResponse = self.get_json(server, "rules").await?;
        Ok(resp.rules)
    }

    /// `GET /providers/rules`, keyed by provider name.
    pub async fn get_rule_providers(&self, server: &Server) -> ApiResult<BTreeMap<String, RuleProvider>> {
        let resp: RuleProvidersResponse = self.get_json(server, "providers/rules").await?;
        Ok(resp.providers)
    }

    /// `PUT /providers/rules/{name}`.
    pub async fn refresh_rule_provider(&self, server: &Server, name: &str) -> ApiResult<()> {
        let path = format!("providers/rules/{}", utf8_percent_encode(name, PATH_SEGMENT));
        self.send_json(Method::PUT, server, &path, &json!({})).await
    }
}
