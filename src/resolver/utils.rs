//! Shared utilities for resolver modules: static regexes, href resolution,
//! and lightweight HTML text extraction.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Compiles a regex at static init; panics on invalid pattern.
pub fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

/// Matches any anchor tag, capturing its attribute blob and inner markup.
pub static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?is)<a\b([^>]*)>(.*?)</a>"));

/// Extracts an `href` attribute value from an attribute blob.
pub static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r#"(?is)href\s*=\s*["']([^"']+)["']"#));

/// Extracts a `class` attribute value from an attribute blob.
pub static CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r#"(?is)class\s*=\s*["']([^"']*)["']"#));

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"(?s)<[^>]*>"));

/// Returns true if the attribute blob carries the given class name.
#[must_use]
pub fn has_class(attrs: &str, class: &str) -> bool {
    CLASS_RE
        .captures(attrs)
        .and_then(|caps| caps.get(1))
        .is_some_and(|value| value.as_str().split_whitespace().any(|c| c == class))
}

/// Returns the `href` value from an attribute blob, if present.
#[must_use]
pub fn href_value(attrs: &str) -> Option<&str> {
    HREF_RE
        .captures(attrs)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Reduces element markup to its visible text: tags stripped, the few
/// entities Launchpad emits decoded, whitespace collapsed.
#[must_use]
pub fn inner_text(markup: &str) -> String {
    let stripped = TAG_RE.replace_all(markup, " ");
    let decoded = stripped
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolves a possibly relative URL string against a base URL.
///
/// Returns the value as-is if it already starts with `http://` or
/// `https://`; normalizes `//...` to `https:...`; otherwise joins with
/// `base_url`.
#[must_use]
pub fn absolutize_url(value: &str, base_url: &Url) -> Option<String> {
    if value.starts_with("http://") || value.starts_with("https://") {
        return Some(value.to_string());
    }
    if value.starts_with("//") {
        return Some(format!("https:{value}"));
    }
    base_url.join(value).ok().map(|url| url.to_string())
}
