//! Error types and error handling for anzen.
//!
//! This module defines all error types used throughout the crate. A failing
//! readiness check is deliberately not represented here: check failures are
//! ordinary data, reported through the readiness endpoint body, and never
//! abort a request.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed error type used for error sources and check failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The main error type for anzen.
#[derive(Debug, Error)]
pub enum AnzenError {
    /// The liveness marker file could not be created. This is the one fatal,
    /// pre-serve failure: the server is never started.
    #[error("Failed to create liveness marker at '{}': {source}", .path.display())]
    MarkerCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The serve loop terminated with an error. Propagated to the caller
    /// verbatim, never interpreted or retried.
    #[error("Server error: {message}")]
    Serve {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The graceful drain failed.
    #[error("Drain error: {message}")]
    Drain {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Invalid configuration.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnzenError {
    /// Creates a marker creation error.
    pub fn marker_creation(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnzenError::MarkerCreation {
            path: path.into(),
            source,
        }
    }

    /// Creates a serve error with a message.
    pub fn serve(message: impl Into<String>) -> Self {
        AnzenError::Serve {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a serve error with a message and source.
    pub fn serve_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AnzenError::Serve {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a drain error with a message.
    pub fn drain(message: impl Into<String>) -> Self {
        AnzenError::Drain {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a drain error with a message and source.
    pub fn drain_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AnzenError::Drain {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        AnzenError::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a configuration error with a message and source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AnzenError::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Result type alias for anzen operations.
pub type Result<T> = std::result::Result<T, AnzenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_creation_display() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = AnzenError::marker_creation("/ro/live", io);
        assert_eq!(
            format!("{}", err),
            "Failed to create liveness marker at '/ro/live': denied"
        );
    }

    #[test]
    fn test_serve_display() {
        let err = AnzenError::serve("server already started");
        assert_eq!(format!("{}", err), "Server error: server already started");
    }

    #[test]
    fn test_config_display() {
        let err = AnzenError::config("liveness marker path must not be empty");
        assert_eq!(
            format!("{}", err),
            "Configuration error: liveness marker path must not be empty"
        );
    }

    #[test]
    fn test_serve_with_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let err = AnzenError::serve_with_source("failed to bind", io);

        let source = std::error::Error::source(&err).expect("source should be preserved");
        assert_eq!(format!("{}", source), "address in use");
    }

    #[test]
    fn test_io_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AnzenError = io.into();
        assert!(matches!(err, AnzenError::Io(_)));
    }
}
