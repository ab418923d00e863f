//! Request identification.
//!
//! # Responsibilities
//! - Assign an `x-request-id` (UUID v4) to requests that arrive without one
//! - Echo the id on the response
//! - Attach method, path and id to the per-request tracing span
//!
//! An inbound id is an inbound header like any other, so the forwarder
//! passes it on to the upstream API.

use axum::{body::Body, http::Request};
use tracing::Span;

pub use tower_http::request_id::{
    MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer,
};

/// Header carrying the request correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Read the request id, if one has been assigned.
pub fn request_id<B>(req: &Request<B>) -> &str {
    req.headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Span factory for `TraceLayer`.
pub fn make_request_span(req: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %req.method(),
        path = %req.uri().path(),
        request_id = %request_id(req),
    )
}
