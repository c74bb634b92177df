//! Download dispatcher: N remote URLs in, N per-file outcomes out.
//!
//! This module provides the [`DownloadDispatcher`] which coordinates
//! concurrent downloads using a semaphore-based concurrency control
//! pattern, with per-file failure isolation and end-of-batch aggregation.
//!
//! # Overview
//!
//! The dispatcher turns an ordered list of artifact URLs into files in a
//! destination directory. A [`ConcurrencyPolicy`] selects between a fixed
//! number of in-flight downloads and one concurrent download per URL; both
//! run through the same dispatch path.
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
//! let urls = vec!["https://example.com/pkg_1.0_amd64.deb".to_string()];
//! let batch = dispatcher.run(&urls, Path::new("./artifacts")).await;
//! for outcome in batch.failures() {
//!     eprintln!("failed: {outcome:?}");
//! }
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use super::error::DownloadError;
use super::filename::filename_from_url;
use super::{DEFAULT_WORKERS, HttpClient};

/// Error type for dispatcher setup.
///
/// Per-file download failures never surface here; they are captured in the
/// [`BatchResult`]. Only configuration problems abort a dispatch before it
/// starts.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// A bounded policy was configured with zero workers.
    #[error("invalid worker count {value}: bounded policy requires at least 1 worker")]
    InvalidWorkerCount {
        /// The invalid value that was provided.
        value: usize,
    },

    /// The shared HTTP client could not be constructed.
    #[error("HTTP client setup failed")]
    ClientSetup(#[source] DownloadError),
}

/// How a batch of download tasks is spread across concurrent workers.
///
/// Both variants run through the same dispatch path: one Tokio task per
/// URL, with a shared semaphore installed only for the bounded variant.
/// `Bounded { workers: N }` over N URLs therefore behaves exactly like
/// `Unbounded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcurrencyPolicy {
    /// At most `workers` downloads in flight at once (`workers` ≥ 1).
    Bounded {
        /// Maximum number of concurrent downloads.
        workers: usize,
    },
    /// One concurrent download per URL, no cap.
    Unbounded,
}

impl ConcurrencyPolicy {
    /// Creates a bounded policy with the given worker count.
    #[must_use]
    pub fn bounded(workers: usize) -> Self {
        Self::Bounded { workers }
    }

    /// Builds the semaphore gating task execution, if this policy caps it.
    fn semaphore(self) -> Option<Arc<Semaphore>> {
        match self {
            Self::Bounded { workers } => Some(Arc::new(Semaphore::new(workers))),
            Self::Unbounded => None,
        }
    }
}

impl Default for ConcurrencyPolicy {
    fn default() -> Self {
        Self::Bounded {
            workers: DEFAULT_WORKERS,
        }
    }
}

/// One unit of download work: a source URL and its destination path.
///
/// Created once per resolved URL at dispatch time, never mutated, and
/// consumed by exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    /// Absolute source URL.
    pub url: String,
    /// Destination file path: the URL's final path segment joined to the
    /// destination directory.
    pub dest_path: PathBuf,
}

impl DownloadTask {
    /// Builds a task for `url`, deriving the filename from its final path
    /// segment.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::InvalidUrl`] when the URL cannot be parsed
    /// or yields no usable filename.
    pub fn new(url: &str, dest_dir: &Path) -> Result<Self, DownloadError> {
        let filename = filename_from_url(url).ok_or_else(|| DownloadError::invalid_url(url))?;
        Ok(Self {
            url: url.to_string(),
            dest_path: dest_dir.join(filename),
        })
    }
}

/// Result of one download task.
#[derive(Debug)]
pub enum DownloadOutcome {
    /// The file was written completely.
    Success {
        /// The task that completed.
        task: DownloadTask,
        /// Body bytes written to disk.
        bytes: u64,
    },
    /// The task failed; other tasks are unaffected.
    Failure {
        /// The originating input URL.
        url: String,
        /// What went wrong for this file.
        error: DownloadError,
    },
}

impl DownloadOutcome {
    /// The input URL this outcome belongs to.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Success { task, .. } => &task.url,
            Self::Failure { url, .. } => url,
        }
    }

    /// Returns true for a successful outcome.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// All outcomes of one dispatched batch.
///
/// Invariant: contains exactly one outcome per input URL, assembled only
/// after every task has finished (the completion barrier). The batch as a
/// whole is not an error even when some outcomes are failures; callers
/// inspect [`failures`](Self::failures) for partial failure.
#[derive(Debug, Default)]
pub struct BatchResult {
    outcomes: Vec<DownloadOutcome>,
}

impl BatchResult {
    fn new(outcomes: Vec<DownloadOutcome>) -> Self {
        Self { outcomes }
    }

    /// All per-task outcomes, in input order.
    #[must_use]
    pub fn outcomes(&self) -> &[DownloadOutcome] {
        &self.outcomes
    }

    /// Number of outcomes (equals the number of input URLs).
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns true for an empty batch.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of successful downloads.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of failed downloads.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }

    /// Returns true when every task succeeded (trivially true when empty).
    #[must_use]
    pub fn is_fully_successful(&self) -> bool {
        self.failure_count() == 0
    }

    /// Iterates over the failed outcomes only.
    pub fn failures(&self) -> impl Iterator<Item = &DownloadOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

/// Download dispatcher for concurrent artifact retrieval.
///
/// # Concurrency Model
///
/// - Each URL gets its own Tokio task
/// - Under a bounded policy, a semaphore permit is acquired before the
///   download starts and released when it finishes (RAII)
/// - The dispatcher joins every task before returning, so no outcome is
///   lost even if a task panics: a join failure is converted into a
///   `Failure` outcome for that URL
///
/// # Shared State
///
/// Tasks share nothing mutable. Each task owns its file handle and
/// response body; outcomes travel back through the join handles, so no
/// lock is needed around the aggregate.
#[derive(Debug)]
pub struct DownloadDispatcher {
    policy: ConcurrencyPolicy,
    client: HttpClient,
}

impl DownloadDispatcher {
    /// Creates a dispatcher with the given policy and per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidWorkerCount`] for a bounded policy
    /// with zero workers, or [`DispatchError::ClientSetup`] if the HTTP
    /// client cannot be built.
    pub fn new(policy: ConcurrencyPolicy, timeout: Duration) -> Result<Self, DispatchError> {
        if let ConcurrencyPolicy::Bounded { workers: 0 } = policy {
            return Err(DispatchError::InvalidWorkerCount { value: 0 });
        }

        let client = HttpClient::with_timeout(timeout).map_err(DispatchError::ClientSetup)?;

        debug!(?policy, "creating download dispatcher");
        Ok(Self { policy, client })
    }

    /// Returns the configured concurrency policy.
    #[must_use]
    pub fn policy(&self) -> ConcurrencyPolicy {
        self.policy
    }

    /// Downloads every URL into `dest_dir` and returns all outcomes.
    ///
    /// `dest_dir` must already exist. An empty URL list yields an empty,
    /// fully successful batch. The returned [`BatchResult`] holds exactly
    /// one outcome per input URL; this method blocks until all of them are
    /// in. Processing order between tasks is unspecified.
    #[instrument(skip(self, urls), fields(urls = urls.len(), dest_dir = %dest_dir.display()))]
    pub async fn run(&self, urls: &[String], dest_dir: &Path) -> BatchResult {
        let semaphore = self.policy.semaphore();
        let mut handles = Vec::with_capacity(urls.len());

        info!("starting batch");

        for url in urls {
            let url = url.clone();
            let task_url = url.clone();
            let client = self.client.clone();
            let semaphore = semaphore.clone();
            let dest_dir = dest_dir.to_path_buf();

            let handle = tokio::spawn(async move {
                // Under a bounded policy, wait for a free worker slot.
                // The semaphore is never closed while the batch runs; if
                // acquisition fails anyway, proceed unpermitted rather
                // than lose this task's outcome.
                let _permit = match semaphore {
                    Some(s) => s.acquire_owned().await.ok(),
                    None => None,
                };
                run_task(&client, &task_url, &dest_dir).await
            });
            handles.push((url, handle));
        }

        debug!(task_count = handles.len(), "waiting for batch completion");

        // Completion barrier: every task yields exactly one outcome, even
        // if its Tokio task panicked.
        let mut outcomes = Vec::with_capacity(handles.len());
        for (url, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(url = %url, error = %e, "download task did not complete");
                    DownloadOutcome::Failure {
                        error: DownloadError::task_abandoned(&url, e.to_string()),
                        url,
                    }
                }
            };
            outcomes.push(outcome);
        }

        let batch = BatchResult::new(outcomes);
        info!(
            total = batch.len(),
            succeeded = batch.success_count(),
            failed = batch.failure_count(),
            "batch complete"
        );
        batch
    }
}

/// Runs one task end to end and reports its outcome.
///
/// Failures are logged as they happen (the immediate stream); the caller
/// reports them again in the end-of-batch summary.
async fn run_task(client: &HttpClient, url: &str, dest_dir: &Path) -> DownloadOutcome {
    let task = match DownloadTask::new(url, dest_dir) {
        Ok(task) => task,
        Err(error) => {
            warn!(url = %url, error = %error, "skipping malformed URL");
            return DownloadOutcome::Failure {
                url: url.to_string(),
                error,
            };
        }
    };

    info!(url = %task.url, path = %task.dest_path.display(), "download started");

    match client.fetch_to_path(&task.url, &task.dest_path).await {
        Ok(bytes) => {
            info!(url = %task.url, bytes, "download finished");
            DownloadOutcome::Success { task, bytes }
        }
        Err(error) => {
            warn!(url = %task.url, error = %error, "download failed");
            DownloadOutcome::Failure {
                url: task.url,
                error,
            }
        }
    }
}
