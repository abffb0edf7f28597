//! Runs a readiness endpoint next to an application server that shuts down
//! safely.
//!
//! The readiness server listens on :9091 (a port the orchestrator can reach
//! but the world cannot), the application on :9090. Send SIGINT or SIGTERM
//! while a slow `/ping` request is in flight to watch the drain finish it.

use anzen::ready::{self, check_fn, HttpGet};
use anzen::{
    run_safe_server, BoxError, GracefulServer, HttpServer, LivenessOptions, ReadinessRegistry,
};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let registry = Arc::new(ReadinessRegistry::new());
    registry.add("passes", check_fn(|| async { Ok::<(), BoxError>(()) }));
    registry.add(
        "fails",
        check_fn(|| async { Err::<(), BoxError>("Failure".into()) }),
    );
    registry.add("google", HttpGet::new("https://www.google.com")?);

    // Run the readiness endpoint alongside the main server.
    let ready_listener = TcpListener::bind("0.0.0.0:9091").await?;
    let ready_server = HttpServer::new(ready_listener, ready::router(Arc::clone(&registry)))?;
    tokio::spawn(async move {
        let _ = ready_server.serve().await;
    });

    // Simulate a long-running request on the application server.
    let app = Router::new().route(
        "/ping",
        get(|| async {
            tracing::info!("Waiting 10 seconds for the request to finish");
            tokio::time::sleep(Duration::from_secs(10)).await;
            "pong"
        }),
    );

    let listener = TcpListener::bind("0.0.0.0:9090").await?;
    let server = HttpServer::new(listener, app)?;

    tracing::info!("Starting a server that will shut down safely");
    run_safe_server(server, LivenessOptions::with_path("/tmp/liveness")).await?;
    tracing::info!("Connections have drained and the server has shut down");

    Ok(())
}
