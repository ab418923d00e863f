//! CORS middleware.
//!
//! Every response gets the configured headers. They are written after the
//! handler runs, so they replace any CORS header relayed from upstream:
//! the proxy's policy always wins over the upstream's. `OPTIONS` on any path
//! short-circuits with 204 and no body, whether or not the path exists.

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderMap, HeaderValue, Method, Request, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Resolved CORS header values.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allow_origin: HeaderValue,
}

impl CorsPolicy {
    pub fn new(allow_origin: HeaderValue) -> Self {
        Self { allow_origin }
    }

    /// Build from the configured origin; invalid values fall back to `*`.
    pub fn from_origin(origin: &str) -> Self {
        let allow_origin = HeaderValue::from_str(origin).unwrap_or_else(|_| {
            tracing::warn!(origin = %origin, "Invalid CORS origin, using *");
            HeaderValue::from_static("*")
        });
        Self::new(allow_origin)
    }

    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
    }
}

pub async fn cors_middleware(
    State(policy): State<CorsPolicy>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let mut response = if *req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };
    policy.apply(response.headers_mut());
    response
}
