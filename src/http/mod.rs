//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, tracing span)
//!     → middleware/cors.rs (OPTIONS short-circuit, CORS headers)
//!     → routing (table dispatch → proxy::Forwarder)
//!     → response.rs (synthetic health / error bodies)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{build_app, AppState, HttpServer};
