//! Destination directory preparation.
//!
//! Downloads land directly in one directory. When the user names a path it
//! is created (including parents) if missing; otherwise a uniquely-named
//! temporary directory is created and left in place after the run so the
//! files survive.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Errors preparing the destination directory. Fatal to the whole run.
#[derive(Debug, Error)]
pub enum DestError {
    /// The named directory could not be created.
    #[error("cannot create destination directory {path}: {source}")]
    Create {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// No temporary directory could be created.
    #[error("cannot create temporary destination directory: {0}")]
    TempDir(#[source] std::io::Error),
}

/// Returns a usable destination directory.
///
/// With `Some(path)`, the path is created with `create_dir_all` and
/// returned. With `None`, a fresh uniquely-named temporary directory is
/// created and kept (not deleted on drop).
///
/// # Errors
///
/// Returns [`DestError`] when no writable directory can be obtained.
pub fn prepare_dest_dir(path: Option<&Path>) -> Result<PathBuf, DestError> {
    match path {
        Some(path) => {
            std::fs::create_dir_all(path).map_err(|e| DestError::Create {
                path: path.to_path_buf(),
                source: e,
            })?;
            debug!(path = %path.display(), "using destination directory");
            Ok(path.to_path_buf())
        }
        None => {
            let dir = tempfile::Builder::new()
                .prefix("ppa-fetch-")
                .tempdir()
                .map_err(DestError::TempDir)?
                .keep();
            debug!(path = %dir.display(), "created temporary destination directory");
            Ok(dir)
        }
    }
}
