//! Launchpad PPA page resolution.
//!
//! This module walks the public Launchpad pages of a PPA to find the build
//! page of a named package and to enumerate the artifact files listed on
//! that build page.
//!
//! # Architecture
//!
//! - [`LaunchpadResolver`] - fetches and scans the `+packages` and build pages
//! - [`PackageSpec`] - what to look for: account, collection, package, version
//! - [`ResolveError`] - fatal resolution errors (fetch, parse, not found)
//!
//! Resolution errors are fatal to a run: no download starts unless the full
//! artifact URL list was obtained.
//!
//! # Example
//!
//! ```no_run
//! use ppa_fetch_core::resolver::{LaunchpadResolver, PackageSpec};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = LaunchpadResolver::new(Duration::from_secs(60))?;
//! let spec = PackageSpec::new("team", "ppa", "mypackage", None);
//! let build_url = resolver.find_build_url(&spec).await?;
//! let urls = resolver.artifact_urls(&build_url).await?;
//! println!("{} artifacts", urls.len());
//! # Ok(())
//! # }
//! ```

mod error;
mod launchpad;
mod utils;

pub use error::ResolveError;
pub use launchpad::{LaunchpadResolver, PackageSpec};
