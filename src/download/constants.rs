//! Constants for the download module (timeouts, worker count).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default per-request timeout (1 minute).
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default bounded worker count.
pub const DEFAULT_WORKERS: usize = 6;
