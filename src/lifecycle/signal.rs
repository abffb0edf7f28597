//! OS termination signal subscription.

use tracing::info;

/// Resolves when the process receives a termination request.
///
/// SIGINT (terminal interrupt) and SIGTERM (the standard orchestrator
/// termination signal) are treated identically. The future stays pending for
/// the entire process lifetime until one of them arrives.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received interrupt signal"),
        _ = terminate => info!("Received termination signal"),
    }
}
