//! OS signal handling.
//!
//! Ctrl-C, SIGTERM (unix) or an internal `Shutdown` trigger all end the
//! server's accept loop; in-flight requests are drained by axum.

use tokio::sync::broadcast;

/// Resolve when the process should shut down.
pub async fn shutdown_signal(mut internal: broadcast::Receiver<()>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    // A dropped coordinator means nobody can ask for shutdown any more.
    let requested = async {
        if let Err(broadcast::error::RecvError::Closed) = internal.recv().await {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("Shutdown signal received"),
        _ = terminate => tracing::info!("SIGTERM received"),
        _ = requested => tracing::info!("Shutdown requested"),
    }
}
