//! ppa-fetch Core Library
//!
//! This library provides the core functionality for the ppa-fetch tool,
//! which resolves a package build on a Launchpad PPA and downloads all
//! of its build artifacts concurrently.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`download`] - Concurrent download dispatcher with streaming support
//! - [`resolver`] - Launchpad PPA page resolution (build link, artifact list)
//! - [`dest`] - Destination directory preparation

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dest;
pub mod download;
pub mod resolver;

// Re-export commonly used types
pub use dest::{DestError, prepare_dest_dir};
pub use download::{
    BatchResult, ConcurrencyPolicy, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS, DispatchError,
    DownloadDispatcher, DownloadError, DownloadOutcome, DownloadTask, HttpClient,
};
pub use resolver::{LaunchpadResolver, PackageSpec, ResolveError};
