//! Declarative route table.
//!
//! Each entry maps a local path pattern to an upstream path template and
//! lists the numeric parameters to validate, in validation order. Patterns
//! use axum's `{name}` capture syntax; templates use the same placeholders.

use std::collections::HashMap;
use std::fmt::Write;

use crate::routing::params::{validate_numeric_param, ParamError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSpec {
    /// Local pattern registered with the router.
    pub pattern: &'static str,
    /// Upstream path template, appended to the base URL.
    pub upstream: &'static str,
    /// Numeric parameters, validated in this order.
    pub params: &'static [&'static str],
}

const fn route(
    pattern: &'static str,
    upstream: &'static str,
    params: &'static [&'static str],
) -> RouteSpec {
    RouteSpec {
        pattern,
        upstream,
        params,
    }
}

/// Every forwarded endpoint.
pub const ROUTES: &[RouteSpec] = &[
    // Players
    route("/player/{id}", "/player/{id}", &["id"]),
    route("/bans/{id}", "/bans/{id}", &["id"]),
    // Servers
    route("/servers", "/servers", &[]),
    route("/game_time", "/game_time", &[]),
    // Events
    route("/events", "/events", &[]),
    route("/events/{id}", "/events/{id}", &["id"]),
    route("/events/user/{id}", "/events/user/{id}", &["id"]),
    // VTCs
    route("/vtc", "/vtc", &[]),
    route("/vtc/{id}", "/vtc/{id}", &["id"]),
    route("/vtc/{id}/news", "/vtc/{id}/news", &["id"]),
    route("/vtc/{id}/news/{news_id}", "/vtc/{id}/news/{news_id}", &["id", "news_id"]),
    route("/vtc/{id}/roles", "/vtc/{id}/roles", &["id"]),
    route("/vtc/{id}/role/{role_id}", "/vtc/{id}/role/{role_id}", &["id", "role_id"]),
    route("/vtc/{id}/members", "/vtc/{id}/members", &["id"]),
    route("/vtc/{id}/member/{member_id}", "/vtc/{id}/member/{member_id}", &["id", "member_id"]),
    route("/vtc/{id}/events", "/vtc/{id}/events", &["id"]),
    route("/vtc/{id}/events/attending", "/vtc/{id}/events/attending", &["id"]),
    route("/vtc/{id}/events/{event_id}", "/vtc/{id}/events/{event_id}", &["id", "event_id"]),
    route("/vtc/{id}/partners", "/vtc/{id}/partners", &["id"]),
    // Misc
    route("/version", "/version", &[]),
    route("/rules", "/rules", &[]),
];

impl RouteSpec {
    /// Validate the captured parameters and render the upstream path.
    ///
    /// Stops at the first invalid parameter.
    pub fn upstream_path(&self, captured: &HashMap<String, String>) -> Result<String, ParamError> {
        let mut values = Vec::with_capacity(self.params.len());
        for &name in self.params {
            values.push((name, validate_numeric_param(captured, name)?));
        }

        let mut path = String::with_capacity(self.upstream.len() + 8);
        for segment in self.upstream.split('/').filter(|s| !s.is_empty()) {
            path.push('/');
            match placeholder(segment) {
                Some(name) => {
                    let value = values
                        .iter()
                        .find(|(param, _)| *param == name)
                        .map(|(_, value)| *value)
                        .ok_or(ParamError { param: name })?;
                    // Writing to a String cannot fail.
                    let _ = write!(path, "{}", value);
                }
                None => path.push_str(segment),
            }
        }
        Ok(path)
    }
}

fn placeholder(segment: &'static str) -> Option<&'static str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}
