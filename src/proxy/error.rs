//! Forwarder failure kinds.
//!
//! The kinds are kept apart for logs and metrics. Callers only ever see
//! one of the fixed messages below.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::http::response::error_response;

pub const FETCH_FAILED: &str = "Failed to fetch data from TruckersMP API";
pub const READ_FAILED: &str = "Failed to read response";

#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    /// The HTTP client itself could not be constructed (startup only).
    #[error("failed to build upstream client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid upstream user agent: {0}")]
    UserAgent(#[source] axum::http::header::InvalidHeaderValue),

    #[error("failed to build upstream request: {0}")]
    Build(#[source] reqwest::Error),

    /// Connect failure, timeout, or any other error before a response head.
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to read upstream body: {0}")]
    ReadBody(#[source] reqwest::Error),
}

impl ForwardError {
    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ForwardError::Client(_) => "client",
            ForwardError::UserAgent(_) => "user_agent",
            ForwardError::Build(_) => "build",
            ForwardError::Transport(e) if e.is_timeout() => "timeout",
            ForwardError::Transport(_) => "transport",
            ForwardError::ReadBody(_) => "read_body",
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            ForwardError::Client(_)
            | ForwardError::UserAgent(_)
            | ForwardError::Build(_)
            | ForwardError::Transport(_) => FETCH_FAILED,
            ForwardError::ReadBody(_) => READ_FAILED,
        }
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        error_response(StatusCode::INTERNAL_SERVER_ERROR, self.public_message())
    }
}
