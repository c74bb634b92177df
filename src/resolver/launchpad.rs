//! Resolver for Launchpad PPA pages.
//!
//! Launchpad lists the source packages of a PPA on its `+packages` page as
//! expandable rows whose link text reads `"<package> - <version>"`. The
//! linked build page lists the produced artifact files as anchors inside
//! `li.package` elements. This resolver scans both pages.

use std::sync::LazyLock;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use regex::Regex;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use super::error::ResolveError;
use super::utils::{
    ANCHOR_RE, absolutize_url, compile_static_regex, has_class, href_value, inner_text,
};

/// Public Launchpad instance.
const DEFAULT_BASE_URL: &str = "https://launchpad.net/";

/// Matches `li.package` elements on a build page, capturing their content.
static LI_PACKAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(
        r#"(?is)<li\b[^>]*class\s*=\s*["'][^"']*\bpackage\b[^"']*["'][^>]*>(.*?)</li>"#,
    )
});

/// Identifies the package build to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    /// Hosting account (the `~user` part of the PPA URL).
    pub account: String,
    /// Archive collection (the PPA name).
    pub collection: String,
    /// Source package name.
    pub package: String,
    /// Exact version filter; `None` accepts any version.
    pub version: Option<String>,
}

impl PackageSpec {
    /// Creates a spec from its parts.
    pub fn new(
        account: impl Into<String>,
        collection: impl Into<String>,
        package: impl Into<String>,
        version: Option<&str>,
    ) -> Self {
        Self {
            account: account.into(),
            collection: collection.into(),
            package: package.into(),
            version: version.map(str::to_string),
        }
    }
}

/// Resolver for a PPA's build page and artifact URL list.
#[derive(Debug, Clone)]
pub struct LaunchpadResolver {
    client: Client,
    base_url: Url,
}

impl LaunchpadResolver {
    /// Creates a resolver against the public Launchpad instance.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ClientSetup`] if the HTTP client cannot be
    /// built.
    pub fn new(timeout: Duration) -> Result<Self, ResolveError> {
        // The default base URL is a valid literal; parse failure would be
        // a programming error surfaced by the unit tests.
        let base_url = Url::parse(DEFAULT_BASE_URL)
            .map_err(|e| ResolveError::url(DEFAULT_BASE_URL, e))?;
        Self::with_base_url(base_url, timeout)
    }

    /// Creates a resolver against an alternate instance (used by tests).
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ClientSetup`] if the HTTP client cannot be
    /// built.
    pub fn with_base_url(base_url: Url, timeout: Duration) -> Result<Self, ResolveError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ResolveError::ClientSetup)?;
        Ok(Self { client, base_url })
    }

    /// Finds the build page URL for the requested package.
    ///
    /// Scans the PPA's `+packages` page for an expander link whose text is
    /// `"<package> - <version>"`, matching on package name and, when the
    /// spec carries a version filter, on the exact version.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::BuildNotFound`] when no link matches
    /// - [`ResolveError::PageFetch`] / [`ResolveError::HttpStatus`] when
    ///   the page cannot be retrieved
    #[instrument(skip(self), fields(package = %spec.package))]
    pub async fn find_build_url(&self, spec: &PackageSpec) -> Result<Url, ResolveError> {
        let page_url = self.packages_page_url(spec)?;
        let html = self.fetch_page(&page_url).await?;

        parse_build_link(&html, &page_url, spec)
            .ok_or_else(|| ResolveError::build_not_found(&spec.package, spec.version.as_deref()))
    }

    /// Lists the artifact URLs on a build page, in document order.
    ///
    /// An empty list is a valid result: the build exists but has published
    /// no files yet.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::PageFetch`] / [`ResolveError::HttpStatus`]
    /// when the page cannot be retrieved.
    #[instrument(skip(self), fields(build_url = %build_url))]
    pub async fn artifact_urls(&self, build_url: &Url) -> Result<Vec<String>, ResolveError> {
        let html = self.fetch_page(build_url).await?;
        let urls = parse_artifact_urls(&html, build_url);
        debug!(count = urls.len(), "artifact URLs listed");
        Ok(urls)
    }

    /// Builds the `+packages` page URL with a cache-busting query
    /// parameter, since Launchpad caches the package listing aggressively.
    fn packages_page_url(&self, spec: &PackageSpec) -> Result<Url, ResolveError> {
        let path = format!(
            "~{}/+archive/ubuntu/{}/+packages",
            spec.account, spec.collection
        );
        let mut url = self
            .base_url
            .join(&path)
            .map_err(|e| ResolveError::url(&path, e))?;
        let nocache = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        url.query_pairs_mut()
            .append_pair("nocache_dummy", &nocache.to_string());
        Ok(url)
    }

    async fn fetch_page(&self, url: &Url) -> Result<String, ResolveError> {
        debug!(url = %url, "fetching page");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ResolveError::page_fetch(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::http_status(url.as_str(), status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| ResolveError::page_fetch(url.as_str(), e))
    }
}

/// Scans a `+packages` page for the expander link matching `spec`.
///
/// Link text must split on `" - "` into exactly a package name and a
/// version. Returns the first matching link's href resolved against the
/// page URL.
fn parse_build_link(html: &str, page_url: &Url, spec: &PackageSpec) -> Option<Url> {
    for caps in ANCHOR_RE.captures_iter(html) {
        let attrs = caps.get(1).map_or("", |m| m.as_str());
        if !has_class(attrs, "expander") {
            continue;
        }

        let text = inner_text(caps.get(2).map_or("", |m| m.as_str()));
        let Some((name, version)) = text.split_once(" - ") else {
            continue;
        };
        if version.contains(" - ") || name != spec.package {
            continue;
        }
        if let Some(wanted) = &spec.version
            && version != wanted
        {
            continue;
        }

        let Some(href) = href_value(attrs) else {
            continue;
        };
        if let Ok(resolved) = page_url.join(href) {
            return Some(resolved);
        }
    }
    None
}

/// Collects the hrefs of anchors inside `li.package` elements, resolved
/// to absolute URLs.
fn parse_artifact_urls(html: &str, build_url: &Url) -> Vec<String> {
    let mut urls = Vec::new();
    for li in LI_PACKAGE_RE.captures_iter(html) {
        let block = li.get(1).map_or("", |m| m.as_str());
        for anchor in ANCHOR_RE.captures_iter(block) {
            let attrs = anchor.get(1).map_or("", |m| m.as_str());
            if let Some(href) = href_value(attrs)
                && let Some(absolute) = absolutize_url(href, build_url)
            {
                urls.push(absolute);
            }
        }
    }
    urls
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://launchpad.net/~team/+archive/ubuntu/stable/+packages?nocache_dummy=1")
            .unwrap()
    }

    fn spec(package: &str, version: Option<&str>) -> PackageSpec {
        PackageSpec::new("team", "stable", package, version)
    }

    const PACKAGES_HTML: &str = r#"
        <table>
          <tr><td>
            <a class="sprite expander" href="+sourcepub/1/+listing-archive-extra">
              foo - 1.0
            </a>
          </td></tr>
          <tr><td>
            <a class="expander" href="+sourcepub/2/+listing-archive-extra">bar - 2.0</a>
          </td></tr>
          <tr><td><a href="/~team">not an expander</a></td></tr>
        </table>
    "#;

    #[test]
    fn test_parse_build_link_matches_package_without_version() {
        let url = parse_build_link(PACKAGES_HTML, &page_url(), &spec("foo", None)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://launchpad.net/~team/+archive/ubuntu/stable/+sourcepub/1/+listing-archive-extra"
        );
    }

    #[test]
    fn test_parse_build_link_matches_exact_version() {
        let url = parse_build_link(PACKAGES_HTML, &page_url(), &spec("bar", Some("2.0"))).unwrap();
        assert!(url.as_str().contains("+sourcepub/2/"));
    }

    #[test]
    fn test_parse_build_link_rejects_absent_version() {
        assert!(parse_build_link(PACKAGES_HTML, &page_url(), &spec("foo", Some("1.1"))).is_none());
    }

    #[test]
    fn test_parse_build_link_rejects_unknown_package() {
        assert!(parse_build_link(PACKAGES_HTML, &page_url(), &spec("baz", None)).is_none());
    }

    #[test]
    fn test_parse_build_link_ignores_malformed_link_text() {
        let html = r#"<a class="expander" href="/x">foo 1.0</a>"#;
        assert!(parse_build_link(html, &page_url(), &spec("foo", None)).is_none());
    }

    #[test]
    fn test_parse_artifact_urls_resolves_relative_hrefs_in_order() {
        let build_url =
            Url::parse("https://launchpad.net/~team/+archive/ubuntu/stable/+sourcepub/1/x")
                .unwrap();
        let html = r#"
            <ul>
              <li class="package"><a href="https://launchpadlibrarian.net/1/foo_1.0.dsc">dsc</a></li>
              <li class="package"><a href="+files/foo_1.0.tar.gz">tar</a></li>
              <li class="other"><a href="https://example.com/skip.deb">skip</a></li>
            </ul>
        "#;
        let urls = parse_artifact_urls(html, &build_url);
        assert_eq!(
            urls,
            vec![
                "https://launchpadlibrarian.net/1/foo_1.0.dsc".to_string(),
                "https://launchpad.net/~team/+archive/ubuntu/stable/+sourcepub/1/+files/foo_1.0.tar.gz"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_artifact_urls_empty_page_yields_empty_list() {
        let build_url = Url::parse("https://launchpad.net/x").unwrap();
        assert!(parse_artifact_urls("<html></html>", &build_url).is_empty());
    }

    #[test]
    fn test_packages_page_url_shape() {
        let resolver = LaunchpadResolver::new(Duration::from_secs(5)).unwrap();
        let url = resolver.packages_page_url(&spec("foo", None)).unwrap();
        assert!(
            url.as_str()
                .starts_with("https://launchpad.net/~team/+archive/ubuntu/stable/+packages")
        );
        assert!(url.query().unwrap().contains("nocache_dummy="));
    }
}
