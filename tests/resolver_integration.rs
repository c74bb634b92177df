//! Integration tests for the Launchpad resolver against mock pages.

use std::time::Duration;

use ppa_fetch_core::resolver::{LaunchpadResolver, PackageSpec, ResolveError};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PACKAGES_PATH: &str = "/~team/+archive/ubuntu/stable/+packages";

fn resolver(server: &MockServer) -> LaunchpadResolver {
    let base = Url::parse(&format!("{}/", server.uri())).expect("mock base url");
    LaunchpadResolver::with_base_url(base, Duration::from_secs(5)).expect("resolver setup")
}

fn spec(package: &str, version: Option<&str>) -> PackageSpec {
    PackageSpec::new("team", "stable", package, version)
}

async fn mount_packages_page(server: &MockServer) {
    let html = r#"
        <html><body><table>
          <tr><td>
            <a class="sprite expander" href="+sourcepub/101/+listing-archive-extra">
              foo - 1.0
            </a>
          </td></tr>
          <tr><td>
            <a class="sprite expander" href="+sourcepub/102/+listing-archive-extra">
              bar - 2.0
            </a>
          </td></tr>
        </table></body></html>
    "#;
    Mock::given(method("GET"))
        .and(path(PACKAGES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_find_build_url_matches_package_without_filter() {
    let server = MockServer::start().await;
    mount_packages_page(&server).await;

    let build_url = resolver(&server)
        .find_build_url(&spec("foo", None))
        .await
        .expect("foo should resolve");

    assert_eq!(
        build_url.as_str(),
        format!(
            "{}/~team/+archive/ubuntu/stable/+sourcepub/101/+listing-archive-extra",
            server.uri()
        )
    );
}

#[tokio::test]
async fn test_find_build_url_with_exact_version() {
    let server = MockServer::start().await;
    mount_packages_page(&server).await;

    let build_url = resolver(&server)
        .find_build_url(&spec("bar", Some("2.0")))
        .await
        .expect("bar 2.0 should resolve");

    assert!(build_url.as_str().contains("+sourcepub/102/"));
}

#[tokio::test]
async fn test_find_build_url_absent_version_is_not_found() {
    let server = MockServer::start().await;
    mount_packages_page(&server).await;

    let err = resolver(&server)
        .find_build_url(&spec("foo", Some("1.1")))
        .await
        .expect_err("version 1.1 is not listed");

    assert!(matches!(err, ResolveError::BuildNotFound { .. }));
    assert!(err.to_string().contains("foo"));
    assert!(err.to_string().contains("1.1"));
}

#[tokio::test]
async fn test_find_build_url_unknown_package_is_not_found() {
    let server = MockServer::start().await;
    mount_packages_page(&server).await;

    let err = resolver(&server)
        .find_build_url(&spec("baz", None))
        .await
        .expect_err("baz is not listed");

    assert!(matches!(err, ResolveError::BuildNotFound { .. }));
}

#[tokio::test]
async fn test_find_build_url_surfaces_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PACKAGES_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = resolver(&server)
        .find_build_url(&spec("foo", None))
        .await
        .expect_err("page fetch should fail");

    assert!(matches!(err, ResolveError::HttpStatus { status: 503, .. }));
}

#[tokio::test]
async fn test_artifact_urls_listed_in_document_order() {
    let server = MockServer::start().await;
    let html = format!(
        r#"
        <html><body><ul>
          <li class="package">
            <a href="{0}/files/foo_1.0.dsc">foo_1.0.dsc</a>
          </li>
          <li class="package">
            <a href="+files/foo_1.0.tar.gz">foo_1.0.tar.gz</a>
          </li>
          <li class="unrelated"><a href="{0}/skip.deb">skip</a></li>
        </ul></body></html>
    "#,
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/~team/+archive/ubuntu/stable/+sourcepub/101/build"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&server)
        .await;
    let build_url = Url::parse(&format!(
        "{}/~team/+archive/ubuntu/stable/+sourcepub/101/build",
        server.uri()
    ))
    .expect("build url");

    let urls = resolver(&server)
        .artifact_urls(&build_url)
        .await
        .expect("artifact listing should succeed");

    assert_eq!(
        urls,
        vec![
            format!("{}/files/foo_1.0.dsc", server.uri()),
            format!(
                "{}/~team/+archive/ubuntu/stable/+sourcepub/101/+files/foo_1.0.tar.gz",
                server.uri()
            ),
        ]
    );
}

#[tokio::test]
async fn test_artifact_urls_empty_build_page_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/build"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><ul></ul></html>"))
        .mount(&server)
        .await;
    let build_url = Url::parse(&format!("{}/build", server.uri())).expect("build url");

    let urls = resolver(&server)
        .artifact_urls(&build_url)
        .await
        .expect("empty listing is valid");

    assert!(urls.is_empty());
}
