//! Lifecycle coordination - graceful shutdown of one abstract server.
//!
//! The coordinator creates the liveness marker, runs the server's blocking
//! accept loop, and concurrently waits for a termination request. On the
//! first request it drains the server and, once both the serve loop and the
//! drain have finished, removes the marker and returns the serve result
//! verbatim.

pub mod http;
pub mod marker;
pub mod server;
pub mod signal;

use crate::config::LivenessOptions;
use crate::error::Result;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{info, warn};

// Re-exports for convenience
pub use http::HttpServer;
pub use marker::LivenessMarker;
pub use server::GracefulServer;

/// Runs the server until the process receives SIGINT or SIGTERM, then drains
/// it gracefully.
///
/// The liveness marker file is created at the configured path right before
/// the server starts and removed right after the drain completes, so an
/// external prober can tell whether the process is alive without requiring
/// network traffic to be routable to it.
///
/// Returns the serve loop's terminal result verbatim. A clean return after a
/// requested shutdown is not distinguished from any other terminal state;
/// callers that care must inspect the result themselves.
pub async fn run_safe_server<S>(server: S, options: LivenessOptions) -> Result<()>
where
    S: GracefulServer + 'static,
{
    run_with_signal(server, options, signal::shutdown_signal()).await
}

/// Runs the server with a caller-supplied termination condition.
///
/// [`run_safe_server`] passes the OS signal subscription here; supplying the
/// future explicitly lets embedders and tests trigger the drain without
/// delivering a process signal.
pub async fn run_with_signal<S, F>(
    server: S,
    options: LivenessOptions,
    termination: F,
) -> Result<()>
where
    S: GracefulServer + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let _marker = LivenessMarker::create(options.marker_path())?;

    let server = Arc::new(server);
    let (drained_tx, drained_rx) = oneshot::channel::<()>();

    let drain_server = Arc::clone(&server);
    tokio::spawn(async move {
        termination.await;
        info!("Termination requested, draining in-flight work");

        // A drain failure is logged, not surfaced separately: the serve
        // loop's own result is what the caller receives.
        if let Err(error) = drain_server.drain().await {
            warn!(%error, "Graceful drain failed");
        }

        let _ = drained_tx.send(());
    });

    let result = server.serve().await;

    // The serve loop has returned; wait for the drain task before releasing
    // the marker so the file outlives shutdown completion.
    let _ = drained_rx.await;

    result
}
