//! anzen - Graceful shutdown and readiness probes for containerized services
//!
//! This crate helps a long-running network service survive orchestrated
//! restarts: termination signals drain in-flight work instead of dropping
//! it, a liveness marker file tells the orchestrator's prober that the
//! process is up without requiring routable HTTP traffic, and a registry of
//! named readiness checks answers the orchestrator's readiness probe with an
//! aggregated verdict.
//!
//! # Overview
//!
//! Two independent components share nothing but the process lifetime:
//!
//! - The lifecycle coordinator ([`run_safe_server`]) wraps any
//!   [`GracefulServer`]: it creates the liveness marker, runs the serve
//!   loop, drains on SIGINT/SIGTERM, and removes the marker once shutdown
//!   has completed.
//! - The readiness aggregator ([`ReadinessRegistry`] + [`ready::router`])
//!   serves `GET /ready`, answering 200 while every registered check passes
//!   and 503 as soon as one fails.
//!
//! # Modules
//!
//! - [`config`] - Coordinator options (liveness marker path)
//! - [`error`] - Error types and error handling
//! - [`lifecycle`] - Marker, signal handling, and shutdown orchestration
//! - [`ready`] - Check registry, built-in probes, and the query endpoint

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod ready;

// Re-exports for convenience
pub use config::LivenessOptions;
pub use error::{AnzenError, BoxError, Result};
pub use lifecycle::{run_safe_server, run_with_signal, GracefulServer, HttpServer};
pub use ready::{ReadinessCheck, ReadinessRegistry};
