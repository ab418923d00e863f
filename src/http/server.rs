//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router from the route table
//! - Wire up middleware (CORS, request ID, tracing)
//! - Serve on a bound listener until shutdown

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::http::middleware::{cors_middleware, CorsPolicy};
use crate::http::request::{
    make_request_span, MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer,
};
use crate::lifecycle::signals::shutdown_signal;
use crate::proxy::{ForwardError, Forwarder};
use crate::routing::build_routes;

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub forwarder: Forwarder,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails only if the upstream HTTP client cannot be constructed.
    pub fn new(config: ProxyConfig) -> Result<Self, ForwardError> {
        let forwarder = Forwarder::from_config(&config.upstream)?;
        let cors = CorsPolicy::from_origin(&config.cors.allowed_origin);
        let router = build_app(forwarder, cors);
        Ok(Self { router, config })
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            allowed_origin = %self.config.cors.allowed_origin,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_app(forwarder: Forwarder, cors: CorsPolicy) -> Router {
    build_routes(AppState { forwarder })
        .layer(middleware::from_fn_with_state(cors, cors_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}
