//! Minimal HTTP client shared by the auth and file service integrations.
//!
//! One call is one round trip: no retries, no timeout override. Failures are
//! folded into `ApiError` here so the services above only ever see the
//! gateway's error taxonomy.

use bytes::Bytes;
use reqwest::{header, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{ApiError, ApiResult};
use crate::types::Payload;

/// Description of a single upstream request
#[derive(Debug)]
pub struct Call<'a> {
    method: Method,
    segments: Vec<&'a str>,
    body: Option<Bytes>,
    authorization: Option<&'a str>,
}

impl<'a> Call<'a> {
    pub fn new(method: Method, segments: &[&'a str]) -> Self {
        Self {
            method,
            segments: segments.to_vec(),
            body: None,
            authorization: None,
        }
    }

    pub fn get(segments: &[&'a str]) -> Self {
        Self::new(Method::GET, segments)
    }

    pub fn post(segments: &[&'a str]) -> Self {
        Self::new(Method::POST, segments)
    }

    pub fn put(segments: &[&'a str]) -> Self {
        Self::new(Method::PUT, segments)
    }

    pub fn delete(segments: &[&'a str]) -> Self {
        Self::new(Method::DELETE, segments)
    }

    /// Serialize `body` as the JSON request payload
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        let encoded = serde_json::to_vec(body).map_err(|e| {
            ApiError::internal_server_error("failed to encode upstream request").with_cause(e)
        })?;
        self.body = Some(Bytes::from(encoded));
        Ok(self)
    }

    /// Send `body` untouched
    pub fn bytes(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }

    /// Forward an `Authorization` header value verbatim
    pub fn authorization(mut self, value: &'a str) -> Self {
        self.authorization = Some(value);
        self
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    service: &'static str,
    base_url: Url,
    http: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(service: &'static str, base_url: Url) -> Self {
        Self {
            service,
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Resolve path segments against the base URL. Each segment is
    /// percent-encoded on its own so it can never add or remove path levels.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(segments);
        }
        url
    }

    /// Perform the call and decode a successful body into `T`
    pub async fn call<T: DeserializeOwned>(&self, call: Call<'_>) -> ApiResult<T> {
        let (status, payload) = self.execute(call).await?;
        serde_json::from_slice(&payload.body).map_err(|e| {
            tracing::warn!(
                service = self.service,
                status = status.as_u16(),
                "undecodable upstream response: {}",
                e
            );
            ApiError::internal_server_error(format!("invalid response from {}", self.service))
                .with_cause(e)
        })
    }

    /// Perform the call and hand back the successful body untouched
    pub async fn call_raw(&self, call: Call<'_>) -> ApiResult<Payload> {
        self.execute(call).await.map(|(_, payload)| payload)
    }

    /// Perform the call and discard a successful body
    pub async fn call_discard(&self, call: Call<'_>) -> ApiResult<()> {
        self.execute(call).await.map(|_| ())
    }

    async fn execute(&self, call: Call<'_>) -> ApiResult<(StatusCode, Payload)> {
        let url = self.endpoint(&call.segments);
        tracing::debug!(service = self.service, method = %call.method, path = url.path(), "upstream call");

        let mut request = self
            .http
            .request(call.method.clone(), url.clone())
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(value) = call.authorization {
            request = request.header(header::AUTHORIZATION, value);
        }
        if let Some(body) = call.body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| self.unavailable(e))?;
        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response.bytes().await.map_err(|e| self.unavailable(e))?;

        if status.as_u16() >= 400 {
            let message = error_message(status, &body);
            tracing::warn!(
                service = self.service,
                method = %call.method,
                path = url.path(),
                status = status.as_u16(),
                "upstream rejected request: {}",
                message
            );
            return Err(ApiError::from_status(status.as_u16(), message));
        }

        Ok((status, Payload::new(content_type, body)))
    }

    fn unavailable(&self, err: reqwest::Error) -> ApiError {
        tracing::warn!(service = self.service, "upstream unreachable: {}", err);
        ApiError::upstream_unavailable(format!("{} is unavailable", self.service)).with_cause(err)
    }
}

/// Message from a backend error body, falling back to the status text
fn error_message(status: StatusCode, body: &[u8]) -> String {
    let from_body = serde_json::from_slice::<Value>(body).ok().and_then(|value| {
        ["error", "message"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::to_string))
    });

    from_body
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("upstream error")
                .to_string()
        })
}
