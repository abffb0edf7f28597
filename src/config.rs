//! Configuration for the lifecycle coordinator.
//!
//! The configuration surface is intentionally small: one recognized option,
//! the liveness marker path. Everything else about the process (bind
//! addresses, routes, handlers) belongs to the caller.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the liveness marker file.
pub const DEFAULT_MARKER_PATH: &str = "/live";

/// Options for the lifecycle coordinator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LivenessOptions {
    /// Filesystem path where the liveness marker file is written.
    /// When unset, [`DEFAULT_MARKER_PATH`] is used.
    pub path: Option<PathBuf>,
}

impl LivenessOptions {
    /// Creates options with the default marker path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options with an explicit marker path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Returns the effective marker path after applying the default.
    pub fn marker_path(&self) -> &Path {
        self.path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_MARKER_PATH))
    }
}
