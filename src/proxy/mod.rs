//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! validated upstream path + inbound method/headers
//!     → forwarder.rs (build request, defaults then inbound headers)
//!     → reqwest client (bounded timeout, single attempt)
//!     → forwarder.rs (copy status + headers, classify body)
//!     → outbound response
//!
//! On failure:
//!     error.rs (typed kind for logs/metrics)
//!     → synthetic 500 with a fixed message
//! ```

pub mod error;
pub mod forwarder;

pub use error::ForwardError;
pub use forwarder::{build_client, Forwarder, UpstreamBody};
