//! TruckersMP API proxy.
//!
//! Re-exposes the public TruckersMP API under local routes with CORS headers
//! and numeric path parameter validation.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server (request id, trace, CORS)
//!                         │
//!                         ▼
//!                     routing (table → validate params → upstream path)
//!                         │            └── 400 / 404 / health answered locally
//!                         ▼
//!                     proxy::Forwarder ──────────▶ api.truckersmp.com/v2
//!                         │
//!     Client Response     ▼
//!     ◀────────────── status + headers + body (JSON normalized)
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod routing;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use proxy::Forwarder;
