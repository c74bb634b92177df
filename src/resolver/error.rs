//! Error types for Launchpad page resolution.

use thiserror::Error;

/// Errors that abort resolution.
///
/// All of these are fatal to the run: downloads only start after the full
/// artifact URL list has been resolved.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The page could not be fetched or its body could not be read.
    #[error("failed to fetch {url}: {source}")]
    PageFetch {
        /// The page URL.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The page responded with a non-2xx status.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The page URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// No build link matched the requested package (and version, if given).
    #[error("build not found for package {package}{}", version_suffix(.version))]
    BuildNotFound {
        /// The requested package name.
        package: String,
        /// The exact version filter, when one was given.
        version: Option<String>,
    },

    /// A page or link URL could not be constructed.
    #[error("invalid URL {input}: {source}")]
    Url {
        /// The input that failed to parse or join.
        input: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The resolver's HTTP client could not be constructed.
    #[error("resolver HTTP client setup failed: {0}")]
    ClientSetup(#[source] reqwest::Error),
}

fn version_suffix(version: &Option<String>) -> String {
    version
        .as_ref()
        .map(|v| format!(" version {v}"))
        .unwrap_or_default()
}

impl ResolveError {
    /// Creates a page fetch error.
    pub fn page_fetch(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::PageFetch {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a build-not-found error.
    pub fn build_not_found(package: impl Into<String>, version: Option<&str>) -> Self {
        Self::BuildNotFound {
            package: package.into(),
            version: version.map(str::to_string),
        }
    }

    /// Creates a URL construction error.
    pub fn url(input: impl Into<String>, source: url::ParseError) -> Self {
        Self::Url {
            input: input.into(),
            source,
        }
    }
}
