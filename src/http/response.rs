//! Synthetic responses generated by the proxy itself.
//!
//! # Responsibilities
//! - Uniform JSON error body: `{"error": true, "message": "..."}`
//! - Health check payload
//! - Catch-all 404
//!
//! None of these contact the upstream API.

use std::borrow::Cow;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Service name reported by the health check.
pub const SERVICE_NAME: &str = "TruckersMP API Proxy";

/// JSON body shared by every synthetic error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: bool,
    pub message: Cow<'static, str>,
}

/// Build a JSON error response with the given status.
pub fn error_response(status: StatusCode, message: impl Into<Cow<'static, str>>) -> Response {
    let body = ErrorBody {
        error: true,
        message: message.into(),
    };
    (status, Json(body)).into_response()
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: u64,
}

/// `GET /health`
pub async fn health() -> Json<HealthStatus> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    Json(HealthStatus {
        status: "healthy",
        service: SERVICE_NAME,
        timestamp,
    })
}

/// Fallback for unknown paths and unsupported methods.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Endpoint not found")
}
