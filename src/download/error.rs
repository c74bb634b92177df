//! Error types for the download module.
//!
//! This module defines structured errors for all per-task download
//! operations, providing context-rich error messages for the end-of-batch
//! failure report.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while downloading a single file.
///
/// Each value is isolated to one task; none of them aborts the batch.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Transport-level error: DNS, connection refused, TLS failure, reset
    /// mid-body, or a non-2xx response. All are reported uniformly.
    #[error("request failed for {url}: {source}")]
    Request {
        /// The URL that failed to download.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout downloading {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// File system error during download (create file, write, flush).
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The provided URL is malformed or has no usable filename.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// The task's worker was abandoned before producing a result.
    #[error("download task for {url} was abandoned: {reason}")]
    TaskAbandoned {
        /// The URL whose task did not complete.
        url: String,
        /// Join failure description (panic message or cancellation).
        reason: String,
    },
}

impl DownloadError {
    /// Creates a transport error from a reqwest error, classifying timeouts.
    pub fn request(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url }
        } else {
            Self::Request { url, source }
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates an abandoned-task error.
    pub fn task_abandoned(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TaskAbandoned {
            url: url.into(),
            reason: reason.into(),
        }
    }
}
