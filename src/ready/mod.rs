//! Readiness aggregation - named checks behind a query endpoint.
//!
//! Readiness checks tell an orchestrator whether this instance is currently
//! able to serve traffic. Typical checks validate a database connection or
//! probe another service's ping endpoint. Register checks on a
//! [`ReadinessRegistry`] and serve [`router`] on a port the orchestrator can
//! reach; the aggregate is unready as soon as any single check fails.
//!
//! Failing checks are ordinary output, not faults: a failure contributes to
//! one query's aggregate and is re-evaluated fresh on the next query.

pub mod checks;
pub mod handlers;


use crate::error::BoxError;
use async_trait::async_trait;
use axum::routing::get;
use axum::Router;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};
use tower_http::trace::TraceLayer;
use tracing::warn;

// Re-exports for convenience
pub use checks::HttpGet;

/// A named readiness predicate.
///
/// `Ok(())` means the condition needed to serve traffic is satisfied. On
/// failure the error's display text becomes the check's detail in verbose
/// query output. Checks carry no timeout of their own; an implementation
/// that waits on the network must bound its own wait.
#[async_trait]
pub trait ReadinessCheck: Send + Sync {
    /// Runs the check once.
    async fn check(&self) -> std::result::Result<(), BoxError>;
}

/// Adapter that wraps an async closure as a [`ReadinessCheck`].
pub struct FnCheck<F> {
    f: F,
}

/// Wraps an async closure as a [`ReadinessCheck`].
pub fn check_fn<F, Fut>(f: F) -> FnCheck<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = std::result::Result<(), BoxError>> + Send,
{
    FnCheck { f }
}

#[async_trait]
impl<F, Fut> ReadinessCheck for FnCheck<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = std::result::Result<(), BoxError>> + Send,
{
    async fn check(&self) -> std::result::Result<(), BoxError> {
        (self.f)().await
    }
}

/// Registry of named readiness checks.
///
/// Construct one registry per process, register checks at startup (or any
/// time after), and hand it to [`router`]. Registration and queries may run
/// concurrently from any number of tasks.
#[derive(Default)]
pub struct ReadinessRegistry {
    checks: RwLock<HashMap<String, Arc<dyn ReadinessCheck>>>,
}

impl ReadinessRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a check under a name.
    ///
    /// Re-registering a name overwrites the prior check. Returns as soon as
    /// the entry is stored; the check itself is never run here.
    pub fn add(&self, name: impl Into<String>, check: impl ReadinessCheck + 'static) {
        let mut checks = self
            .checks
            .write()
            .expect("poisoned readiness registry lock");
        checks.insert(name.into(), Arc::new(check));
    }

    /// Snapshots the registered checks under the read lock.
    fn snapshot(&self) -> Vec<(String, Arc<dyn ReadinessCheck>)> {
        let checks = self
            .checks
            .read()
            .expect("poisoned readiness registry lock");
        checks
            .iter()
            .map(|(name, check)| (name.clone(), Arc::clone(check)))
            .collect()
    }

    /// Runs every registered check and aggregates the outcome.
    ///
    /// The checks observed are the ones present when the pass begins; they
    /// run after the lock is released, so a slow probe delays only this
    /// query, never registrations or other queries.
    pub async fn collect(&self) -> ReadinessReport {
        let mut ready = true;
        let mut results = HashMap::new();

        for (name, check) in self.snapshot() {
            match check.check().await {
                Ok(()) => {
                    results.insert(name, "OK".to_string());
                }
                Err(error) => {
                    ready = false;
                    warn!(check = %name, %error, "Readiness check failed");
                    results.insert(name, error.to_string());
                }
            }
        }

        ReadinessReport { ready, results }
    }
}

/// Aggregated outcome of one readiness pass.
#[derive(Debug, Clone)]
pub struct ReadinessReport {
    /// True when every registered check passed (an empty registry is ready).
    pub ready: bool,
    /// Per-check outcome: `"OK"` on success, the failure detail otherwise.
    pub results: HashMap<String, String>,
}

/// Creates the readiness router with the single query endpoint.
///
/// The endpoint answers `GET /ready`; any other method receives a 405 with
/// no side effects.
pub fn router(registry: Arc<ReadinessRegistry>) -> Router {
    Router::new()
        .route("/ready", get(handlers::ready))
        .layer(TraceLayer::new_for_http())
        .with_state(registry)
}
