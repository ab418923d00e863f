//! Upstream request forwarding.
//!
//! # Responsibilities
//! - Build one upstream request per inbound request (method + headers, no body)
//! - Execute it with the client's bounded timeout
//! - Relay status, headers and body, normalizing JSON bodies
//!
//! # Design Decisions
//! - The client is injected; the forwarder holds no mutable state
//! - Inbound headers are appended after the defaults, so duplicates accumulate
//! - Bodies are buffered whole; upstream payloads are small
//! - Upstream 4xx/5xx are relayed, never treated as forwarder errors

use std::time::{Duration, Instant};

use axum::{
    body::{Body, Bytes},
    http::{
        header::{self, HeaderName},
        HeaderMap, HeaderValue, Method, Response,
    },
    response::IntoResponse,
};

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::proxy::error::ForwardError;

/// Headers tied to a single connection hop. Never copied in either direction.
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    HeaderName::from_static("proxy-connection"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
];

/// Request headers the client derives for the upstream connection itself.
const CLIENT_OWNED: [HeaderName; 3] = [header::HOST, header::CONTENT_LENGTH, header::UPGRADE];

/// Upstream body after the JSON capability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamBody {
    /// The bytes parsed as JSON; holds the re-serialized document.
    Json(Bytes),
    /// Anything else, relayed untouched.
    Opaque(Bytes),
}

impl UpstreamBody {
    /// Re-encode `raw` if it is one complete JSON document.
    pub fn classify(raw: Bytes) -> Self {
        match normalize_json(&raw) {
            Some(encoded) => UpstreamBody::Json(Bytes::from(encoded)),
            None => UpstreamBody::Opaque(raw),
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, UpstreamBody::Json(_))
    }

    pub fn into_bytes(self) -> Bytes {
        match self {
            UpstreamBody::Json(bytes) | UpstreamBody::Opaque(bytes) => bytes,
        }
    }
}

fn normalize_json(raw: &[u8]) -> Option<Vec<u8>> {
    let value: serde_json::Value = serde_json::from_slice(raw).ok()?;
    serde_json::to_vec(&value).ok()
}

/// Forwards requests to one fixed upstream base URL.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    base_url: String,
    user_agent: HeaderValue,
}

impl Forwarder {
    /// Create a forwarder around an existing client.
    ///
    /// The client's own timeout is the only bound on an upstream call.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, user_agent: HeaderValue) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            user_agent,
        }
    }

    /// Build the client and forwarder described by `config`.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, ForwardError> {
        let client = build_client(Duration::from_secs(config.timeout_secs))?;
        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(ForwardError::UserAgent)?;
        Ok(Self::new(client, config.base_url.clone(), user_agent))
    }

    /// Forward one request and produce the response for the caller.
    ///
    /// Never fails: forwarder errors become synthetic 500 responses.
    pub async fn forward(&self, method: &Method, inbound: &HeaderMap, upstream_path: &str) -> Response<Body> {
        let start = Instant::now();
        match self.try_forward(method, inbound, upstream_path).await {
            Ok(response) => {
                tracing::debug!(
                    method = %method,
                    upstream_path = %upstream_path,
                    status = response.status().as_u16(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream responded"
                );
                response
            }
            Err(e) => {
                tracing::warn!(
                    method = %method,
                    upstream_path = %upstream_path,
                    kind = e.kind(),
                    error = %e,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream request failed"
                );
                metrics::record_upstream_error(e.kind());
                e.into_response()
            }
        }
    }

    async fn try_forward(
        &self,
        method: &Method,
        inbound: &HeaderMap,
        upstream_path: &str,
    ) -> Result<Response<Body>, ForwardError> {
        let url = format!("{}{}", self.base_url, upstream_path);

        let mut request = self
            .client
            .request(method.clone(), url)
            .build()
            .map_err(ForwardError::Build)?;
        *request.headers_mut() = self.upstream_headers(inbound);

        let upstream = self
            .client
            .execute(request)
            .await
            .map_err(ForwardError::Transport)?;

        let status = upstream.status();
        let upstream_headers = upstream.headers().clone();
        let raw = upstream.bytes().await.map_err(ForwardError::ReadBody)?;

        let body = UpstreamBody::classify(raw);
        let is_json = body.is_json();

        let mut response = Response::new(Body::from(body.into_bytes()));
        *response.status_mut() = status;

        let headers = response.headers_mut();
        for (name, value) in upstream_headers.iter() {
            if HOP_BY_HOP.contains(name) || *name == header::CONTENT_LENGTH {
                continue;
            }
            headers.append(name.clone(), value.clone());
        }
        if is_json && !headers.contains_key(header::CONTENT_TYPE) {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json; charset=utf-8"),
            );
        }

        Ok(response)
    }

    /// Defaults first, then every inbound value appended on top.
    fn upstream_headers(&self, inbound: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(inbound.len() + 2);
        headers.insert(header::USER_AGENT, self.user_agent.clone());
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        for (name, value) in inbound.iter() {
            if HOP_BY_HOP.contains(name) || CLIENT_OWNED.contains(name) {
                continue;
            }
            headers.append(name.clone(), value.clone());
        }
        headers
    }
}

/// Build the shared upstream client with a total per-call timeout.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, ForwardError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(ForwardError::Client)
}
