//! CLI entry point for the ppa-fetch tool.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use ppa_fetch_core::{
    ConcurrencyPolicy, DownloadDispatcher, LaunchpadResolver, PackageSpec, prepare_dest_dir,
};
use tracing::{debug, info, warn};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let timeout = Duration::from_secs(args.timeout_secs);
    let spec = PackageSpec::new(&args.user, &args.repo, &args.pkg, args.pkg_version.as_deref());

    // Resolution failures are fatal: no download starts without the full list.
    let resolver = LaunchpadResolver::new(timeout)?;
    let build_url = resolver.find_build_url(&spec).await?;
    info!(build_url = %build_url, "build page resolved");

    let urls = resolver.artifact_urls(&build_url).await?;
    if urls.is_empty() {
        info!("build has no artifacts yet; nothing to download");
        return Ok(());
    }
    info!(artifacts = urls.len(), "artifact URLs resolved");

    let dest_dir = prepare_dest_dir(args.dest.as_deref())?;

    let policy = if args.unbounded {
        ConcurrencyPolicy::Unbounded
    } else {
        ConcurrencyPolicy::bounded(usize::from(args.concurrency))
    };
    let dispatcher = DownloadDispatcher::new(policy, timeout)?;

    let batch = dispatcher.run(&urls, &dest_dir).await;

    // End-of-batch report: per-file failures are named individually but do
    // not fail the process.
    for outcome in batch.failures() {
        if let ppa_fetch_core::DownloadOutcome::Failure { url, error } = outcome {
            warn!(url = %url, error = %error, "file was not downloaded");
        }
    }
    info!(
        downloaded = batch.success_count(),
        failed = batch.failure_count(),
        dest = %dest_dir.display(),
        "downloaded files to {}",
        dest_dir.display()
    );

    Ok(())
}
