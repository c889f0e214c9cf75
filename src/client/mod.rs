//! HTTP dispatch and payload normalization for the console API.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::AuthdeckConfig;
use crate::error::{AuthdeckError, Result};

/// Client for the console's REST surface.
///
/// Carries the session cookie ambiently (a cookie store is enabled on the
/// underlying `reqwest::Client`), so authenticated calls need no explicit
/// credential plumbing. Every call is a fresh round trip: no retries and
/// no caching, keeping reads strictly consistent with the last write.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AuthdeckConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request and normalize the response.
    ///
    /// The body is read as text first. Non-empty text is JSON-decoded; text
    /// that fails to decode is wrapped as `{"error": <text>}` instead of
    /// surfacing a parse error. Non-2xx statuses fail with the payload's
    /// `error` field when present, else `HTTP <status>`. The JSON
    /// content-type header is only set when a body is attached.
    pub async fn call(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        debug!(%method, path, status = status.as_u16(), "api call");

        let payload = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or_else(|_| json!({ "error": text }))
        };

        if !status.is_success() {
            let message = payload
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(AuthdeckError::api(status.as_u16(), message));
        }

        Ok(payload)
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.call(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.call(Method::POST, path, Some(body)).await
    }

    /// POST without a body (revoke, logout, read-all and similar).
    pub async fn post_empty(&self, path: &str) -> Result<Value> {
        self.call(Method::POST, path, None).await
    }

    pub async fn put(&self, path: &str, body: Value) -> Result<Value> {
        self.call(Method::PUT, path, Some(body)).await
    }

    pub async fn patch(&self, path: &str, body: Value) -> Result<Value> {
        self.call(Method::PATCH, path, Some(body)).await
    }

    /// GET a typed record.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        decode(self.get(path).await?)
    }

    /// POST a body and decode the typed response.
    pub async fn post_json<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T> {
        decode(self.post(path, body).await?)
    }

    /// Body-less POST with a typed response.
    pub async fn post_empty_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        decode(self.post_empty(path).await?)
    }

    pub async fn put_json<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T> {
        decode(self.put(path, body).await?)
    }
}

/// Decode a normalized payload into a typed record.
pub fn decode<T: DeserializeOwned>(payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(AuthdeckError::from)
}
