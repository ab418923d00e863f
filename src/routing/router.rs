//! Route registration and dispatch.
//!
//! # Responsibilities
//! - Register every table entry as a GET route
//! - Validate parameters, render the upstream path, invoke the forwarder
//! - Answer `/health` and unknown paths locally
//!
//! # Design Decisions
//! - One generic dispatch function serves the whole table
//! - Methods other than GET/HEAD on a known path fall through to the 404
//! - Validation failures never reach the forwarder

use std::collections::HashMap;
use std::time::Instant;

use axum::{
    extract::{path::ErrorKind, rejection::PathRejection, Path, State},
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
    routing::{get, MethodRouter},
    Router,
};

use crate::http::response::{health, not_found};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::params::ParamError;
use crate::routing::table::{RouteSpec, ROUTES};

/// Build the routing layer: health check, route table, 404 fallback.
pub fn build_routes(state: AppState) -> Router {
    let mut router = Router::new().route("/health", get(health).fallback(not_found));

    for entry in ROUTES {
        router = router.route(entry.pattern, method_router(entry));
    }

    router.fallback(not_found).with_state(state)
}

fn method_router(entry: &'static RouteSpec) -> MethodRouter<AppState> {
    let handler = if entry.params.is_empty() {
        get(
            move |State(state): State<AppState>, method: Method, headers: HeaderMap| async move {
                dispatch(&state, entry, &HashMap::new(), method, headers).await
            },
        )
    } else {
        get(
            move |State(state): State<AppState>,
                  captured: Result<Path<HashMap<String, String>>, PathRejection>,
                  method: Method,
                  headers: HeaderMap| async move {
                match captured {
                    Ok(Path(captured)) => dispatch(&state, entry, &captured, method, headers).await,
                    Err(rejection) => reject_capture(entry, &rejection, &method),
                }
            },
        )
    };
    handler.fallback(not_found)
}

/// Captures that cannot be extracted (e.g. percent-encoded bytes that are not
/// UTF-8) fail validation like any other malformed parameter.
fn reject_capture(entry: &'static RouteSpec, rejection: &PathRejection, method: &Method) -> Response {
    let start = Instant::now();
    let key = match rejection {
        PathRejection::FailedToDeserializePathParams(e) => match e.kind() {
            ErrorKind::InvalidUtf8InPathParam { key } => Some(key.as_str()),
            _ => None,
        },
        _ => None,
    };
    let param = key
        .and_then(|key| entry.params.iter().copied().find(|p| *p == key))
        .or_else(|| entry.params.first().copied())
        .unwrap_or_default();

    tracing::debug!(route = entry.pattern, param, rejection = %rejection, "Unreadable path parameter");
    let response = ParamError { param }.into_response();
    metrics::record_request(method.as_str(), response.status().as_u16(), entry.pattern, start);
    response
}

/// Validate, map and forward one request for `entry`.
pub async fn dispatch(
    state: &AppState,
    entry: &'static RouteSpec,
    captured: &HashMap<String, String>,
    method: Method,
    headers: HeaderMap,
) -> Response {
    let start = Instant::now();

    let response = match entry.upstream_path(captured) {
        Ok(upstream_path) => {
            state
                .forwarder
                .forward(&method, &headers, &upstream_path)
                .await
        }
        Err(e) => {
            tracing::debug!(route = entry.pattern, param = e.param, "Rejected path parameter");
            e.into_response()
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), entry.pattern, start);
    response
}
