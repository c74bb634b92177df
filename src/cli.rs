//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use ppa_fetch_core::{DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS};

/// Fetch all build artifacts of a Launchpad PPA package.
///
/// ppa-fetch finds the build of a named source package on a PPA and
/// downloads every artifact file it published into one directory.
#[derive(Parser, Debug)]
#[command(name = "ppa-fetch")]
#[command(author, version, about)]
pub struct Args {
    /// Hosting account (the ~user owning the PPA)
    #[arg(short = 'u', long)]
    pub user: String,

    /// Archive collection (the PPA name)
    #[arg(short = 'r', long)]
    pub repo: String,

    /// Source package name
    #[arg(short = 'p', long)]
    pub pkg: String,

    /// Exact package version to match (any version if omitted)
    #[arg(long)]
    pub pkg_version: Option<String>,

    /// Destination directory (a fresh temporary directory if omitted)
    #[arg(short = 'd', long)]
    pub dest: Option<PathBuf>,

    /// Maximum concurrent downloads (1-100)
    #[arg(short = 'c', long, default_value_t = DEFAULT_WORKERS as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub concurrency: u8,

    /// Start every download at once instead of using a worker pool
    #[arg(long, conflicts_with = "concurrency")]
    pub unbounded: bool,

    /// Per-request timeout in seconds (1-3600)
    #[arg(short = 't', long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub timeout_secs: u64,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
