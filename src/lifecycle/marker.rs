//! Liveness marker file lifecycle.
//!
//! The marker is a plain file whose existence signals "the process has
//! completed startup and has not yet fully shut down". An external liveness
//! prober only checks for existence; the content is empty.

use crate::error::{AnzenError, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Guard over the liveness marker file.
///
/// Created right before the server starts accepting work; dropping the guard
/// removes the file. Removal is best-effort: a failure is logged and never
/// escalated, so a cleanup problem cannot mask the real shutdown outcome.
#[derive(Debug)]
pub struct LivenessMarker {
    path: PathBuf,
}

impl LivenessMarker {
    /// Creates the marker file at the given path.
    ///
    /// Fails with [`AnzenError::MarkerCreation`] if the file cannot be
    /// created (missing directory, permissions, disk full).
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if path.as_os_str().is_empty() {
            return Err(AnzenError::config("liveness marker path must not be empty"));
        }

        File::create(&path).map_err(|e| AnzenError::marker_creation(path.clone(), e))?;
        debug!(path = %path.display(), "Liveness marker created");

        Ok(Self { path })
    }

    /// Returns the path of the marker file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LivenessMarker {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Liveness marker removed"),
            Err(error) => {
                warn!(
                    path = %self.path.display(),
                    %error,
                    "Failed to remove liveness marker"
                );
            }
        }
    }
}
