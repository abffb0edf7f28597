//! HTTP request handler for the readiness endpoint.

use crate::ready::ReadinessRegistry;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Query parameters for the readiness endpoint.
#[derive(Debug, Deserialize)]
pub struct ReadyQuery {
    /// Verbose toggle; the per-check mapping is returned only for `v=1`.
    pub v: Option<String>,
}

impl ReadyQuery {
    fn verbose(&self) -> bool {
        self.v.as_deref() == Some("1")
    }
}

/// Readiness handler.
///
/// GET /ready
///
/// Responds 200 when every registered check passes and 503 otherwise. The
/// orchestrator typically inspects only the status code, so the body stays
/// an empty object unless verbose output was requested with `?v=1`.
pub async fn ready(
    State(registry): State<Arc<ReadinessRegistry>>,
    Query(query): Query<ReadyQuery>,
) -> impl IntoResponse {
    let report = registry.collect().await;

    let status = if report.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    debug!(
        ready = report.ready,
        checks = report.results.len(),
        "Readiness query evaluated"
    );

    if query.verbose() {
        (status, Json(report.results))
    } else {
        (status, Json(HashMap::new()))
    }
}
