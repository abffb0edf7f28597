//! Axum-backed implementation of the server capability.

use crate::error::{AnzenError, Result};
use crate::lifecycle::GracefulServer;
use async_trait::async_trait;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{watch, Mutex, Notify};
use tracing::info;

/// An HTTP server that can be driven by the lifecycle coordinator.
///
/// Wraps a bound listener and an axum router. [`serve`](GracefulServer::serve)
/// runs the accept loop with graceful shutdown armed;
/// [`drain`](GracefulServer::drain) stops the listener from accepting new
/// connections and waits until in-flight requests have finished.
pub struct HttpServer {
    listener: Mutex<Option<TcpListener>>,
    router: Router,
    addr: SocketAddr,
    shutdown: Arc<Notify>,
    drained: watch::Sender<bool>,
}

impl HttpServer {
    /// Creates a server from a bound listener and a router.
    pub fn new(listener: TcpListener, router: Router) -> Result<Self> {
        let addr = listener.local_addr()?;
        let (drained, _) = watch::channel(false);

        Ok(Self {
            listener: Mutex::new(Some(listener)),
            router,
            addr,
            shutdown: Arc::new(Notify::new()),
            drained,
        })
    }

    /// Returns the address the server is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }
}

#[async_trait]
impl GracefulServer for HttpServer {
    async fn serve(&self) -> Result<()> {
        let listener = self
            .listener
            .lock()
            .await
            .take()
            .ok_or_else(|| AnzenError::serve("server already started"))?;

        info!(address = %self.addr, "HTTP server starting");

        let shutdown = Arc::clone(&self.shutdown);
        let result = axum::serve(listener, self.router.clone())
            .with_graceful_shutdown(async move { shutdown.notified().await })
            .await;

        // Whether the loop ended through a drain or an error, in-flight work
        // is finished once axum::serve returns.
        self.drained.send_replace(true);
        info!(address = %self.addr, "HTTP server stopped");

        result.map_err(|e| {
            let message = e.to_string();
            AnzenError::serve_with_source(message, e)
        })
    }

    async fn drain(&self) -> Result<()> {
        self.shutdown.notify_one();

        let mut drained = self.drained.subscribe();
        drained
            .wait_for(|done| *done)
            .await
            .map_err(|_| AnzenError::drain("server dropped before drain completed"))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use std::time::Duration;
    use tokio::time::timeout;
    use tokio_test::assert_ok;

    fn test_router() -> Router {
        Router::new().route("/", get(|| async { "ok" }))
    }

    async fn bound_server() -> Arc<HttpServer> {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        Arc::new(HttpServer::new(listener, test_router()).unwrap())
    }

    #[tokio::test]
    async fn test_serves_requests_and_drains() {
        let server = bound_server().await;
        let addr = server.local_addr();

        let serve_server = Arc::clone(&server);
        let serve_task = tokio::spawn(async move { serve_server.serve().await });

        let body = reqwest::get(format!("http://{}/", addr))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "ok");

        timeout(Duration::from_secs(5), server.drain())
            .await
            .expect("drain should complete")
            .unwrap();

        let result = timeout(Duration::from_secs(5), serve_task)
            .await
            .expect("serve should return after drain")
            .unwrap();
        tokio_test::assert_ok!(result);
    }

    #[tokio::test]
    async fn test_serve_twice_fails() {
        let server = bound_server().await;

        let serve_server = Arc::clone(&server);
        let serve_task = tokio::spawn(async move { serve_server.serve().await });

        // Wait until the first serve call has claimed the listener.
        let addr = server.local_addr();
        while reqwest::get(format!("http://{}/", addr)).await.is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let result = server.serve().await;
        assert!(matches!(result, Err(AnzenError::Serve { .. })));

        server.drain().await.unwrap();
        serve_task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_drain_before_accept_loop_is_armed() {
        let server = bound_server().await;

        // Trigger the shutdown notification first; the stored permit must
        // stop the accept loop as soon as it starts.
        let drain_server = Arc::clone(&server);
        let drain_task = tokio::spawn(async move { drain_server.drain().await });

        let result = timeout(Duration::from_secs(5), server.serve())
            .await
            .expect("serve should observe the pending drain");
        tokio_test::assert_ok!(result);

        drain_task.await.unwrap().unwrap();
    }
}
