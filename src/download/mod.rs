//! Concurrent download dispatcher for streaming files to disk.
//!
//! This module turns a list of remote file URLs into local files in a
//! destination directory, with bounded or unbounded parallelism, per-file
//! failure isolation, and aggregated outcome reporting.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large files)
//! - Filename derived from the URL's final path segment
//! - Configurable per-request timeout
//! - Exactly one outcome per input URL, even if a task panics
//!
//! # Example
//!
//! ```no_run
//! use ppa_fetch_core::download::{ConcurrencyPolicy, DownloadDispatcher};
//! use std::path::Path;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dispatcher =
//!     DownloadDispatcher::new(ConcurrencyPolicy::bounded(6), Duration::from_secs(60))?;
//! let urls = vec!["https://example.com/pkg_1.0.deb".to_string()];
//! let batch = dispatcher.run(&urls, Path::new("./artifacts")).await;
//! println!("{} downloaded, {} failed", batch.success_count(), batch.failure_count());
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod engine;
mod error;
mod filename;

pub use client::HttpClient;
pub use constants::{CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS};
pub use engine::{
    BatchResult, ConcurrencyPolicy, DispatchError, DownloadDispatcher, DownloadOutcome,
    DownloadTask,
};
pub use error::DownloadError;
pub use filename::filename_from_url;
