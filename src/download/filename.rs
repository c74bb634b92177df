//! Filename derivation from artifact URLs.
//!
//! Artifacts are written directly into the destination directory, named
//! after the URL's final path segment. Segments that would escape the
//! directory or collide with special names are rejected.

use url::Url;

/// Derives the destination filename from a URL's final path segment.
///
/// Returns `None` when the URL cannot be parsed or when the final segment
/// is empty or unusable as a plain filename (`.`, `..`, embedded
/// separators after sanitization).
#[must_use]
pub fn filename_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .next_back()?;
    let cleaned = sanitize_segment(segment);
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        return None;
    }
    Some(cleaned)
}

/// Strips characters that are unsafe in a plain filename.
///
/// Path separators and NUL would let a crafted URL write outside the
/// destination directory; control characters break terminal output.
fn sanitize_segment(segment: &str) -> String {
    segment
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '\0') && !c.is_control())
        .collect()
}
