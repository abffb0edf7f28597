//! Built-in readiness checks.

use crate::error::{AnzenError, BoxError, Result};
use crate::ready::ReadinessCheck;
use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Opinionated limit for how slow a probed endpoint may respond.
const DEFAULT_TIMEOUT: Duration = Duration::from_millis(200);

/// A readiness check that performs an HTTP GET against a URL.
///
/// The check fails if the response takes longer than the configured timeout
/// or returns a non-200 status code. Redirects are never followed.
pub struct HttpGet {
    client: Client,
    url: String,
}

impl HttpGet {
    /// Creates a probe with the default 200ms timeout.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    /// Creates a probe with a custom timeout.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .build()
            .map_err(|e| AnzenError::config_with_source("Failed to build HTTP probe client", e))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ReadinessCheck for HttpGet {
    async fn check(&self) -> std::result::Result<(), BoxError> {
        let response = self.client.get(&self.url).send().await?;

        debug!(url = %self.url, status = %response.status(), "HTTP probe answered");

        if response.status() != StatusCode::OK {
            return Err(format!("Received {}", response.status().as_u16()).into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum::Router;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    async fn spawn_backend(router: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn test_http_get_passes_on_200() {
        let addr = spawn_backend(Router::new().route("/", get(|| async { "up" }))).await;

        let check = HttpGet::new(format!("http://{}/", addr)).unwrap();
        assert!(check.check().await.is_ok());
    }

    #[tokio::test]
    async fn test_http_get_fails_on_non_200() {
        let addr = spawn_backend(Router::new().route(
            "/",
            get(|| async { axum::http::StatusCode::INTERNAL_SERVER_ERROR }),
        ))
        .await;

        let check = HttpGet::new(format!("http://{}/", addr)).unwrap();
        let detail = check.check().await.unwrap_err().to_string();
        assert_eq!(detail, "Received 500");
    }

    #[tokio::test]
    async fn test_http_get_does_not_follow_redirects() {
        let addr = spawn_backend(Router::new().route(
            "/",
            get(|| async {
                (
                    axum::http::StatusCode::FOUND,
                    [(axum::http::header::LOCATION, "/elsewhere")],
                )
            }),
        ))
        .await;

        let check = HttpGet::new(format!("http://{}/", addr)).unwrap();
        let detail = check.check().await.unwrap_err().to_string();
        assert_eq!(detail, "Received 302");
    }

    #[tokio::test]
    async fn test_http_get_fails_on_connection_error() {
        // Bind a port and release it so the probe targets a dead address.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let check = HttpGet::with_timeout(format!("http://{}/", addr), Duration::from_secs(1))
            .unwrap();
        assert!(check.check().await.is_err());
    }
}
