//! Axum middleware applied to every route and the fallback.

pub mod cors;

pub use cors::{cors_middleware, CorsPolicy};
