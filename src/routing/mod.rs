//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path, headers)
//!     → router.rs (axum path match against the table)
//!     → params.rs (validate numeric captures, first failure → 400)
//!     → table.rs (render upstream path)
//!     → proxy::Forwarder
//!
//! No match:
//!     → 404 {"error": true, "message": "Endpoint not found"}
//! ```
//!
//! # Design Decisions
//! - Routes are data, compiled into the axum router at startup
//! - Static segments win over captures (`/vtc/{id}/events/attending`)
//! - Deterministic: same path always maps to the same upstream path

pub mod params;
pub mod router;
pub mod table;

pub use params::{validate_numeric_param, ParamError};
pub use router::build_routes;
pub use table::{RouteSpec, ROUTES};
