//! Path parameter validation.
//!
//! Numeric parameters must parse as a 64-bit integer and be non-negative.
//! Accepted values are rendered back in canonical decimal form before they
//! reach the upstream path.

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::http::response::error_response;

/// A path parameter that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {param} parameter")]
pub struct ParamError {
    pub param: &'static str,
}

impl IntoResponse for ParamError {
    fn into_response(self) -> Response {
        error_response(StatusCode::BAD_REQUEST, self.to_string())
    }
}

/// Look up `name` in the extracted path parameters and validate it.
pub fn validate_numeric_param(
    params: &HashMap<String, String>,
    name: &'static str,
) -> Result<i64, ParamError> {
    params
        .get(name)
        .and_then(|raw| parse_non_negative(raw))
        .ok_or(ParamError { param: name })
}

fn parse_non_negative(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|value| *value >= 0)
}
