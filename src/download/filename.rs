//! Filename derivation and sanitization for downloaded PDFs.
//!
//! The name comes from the last segment of the URL path. When that segment
//! does not look like a PDF, the `Content-Disposition` header gets a chance
//! to supply one. Either way the result is made safe for common filesystems.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Captures everything after the first `filename=` up to the end of the line.
#[allow(clippy::expect_used)]
static DISPOSITION_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"filename=(.+)").expect("filename regex is valid") // Static pattern, safe to panic
});

/// Characters rejected by at least one common filesystem.
const FORBIDDEN_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Derives the local filename for `url`.
///
/// `content_disposition` is the raw `Content-Disposition` header value, if the
/// response carried one. It is only consulted when the URL's last path segment
/// does not end in `.pdf`. Extension-less names are kept as they are.
///
/// The result may be empty when the URL path ends in `/` and no header
/// fallback applies; callers decide how to treat that.
#[must_use]
pub fn resolve_filename(url: &str, content_disposition: Option<&str>) -> String {
    let mut name = url_basename(url);

    if !has_pdf_suffix(&name)
        && let Some(from_header) = content_disposition.and_then(content_disposition_filename)
    {
        name = from_header;
    }

    sanitize_filename(&name)
}

/// Returns the last segment of the URL path, or an empty string.
fn url_basename(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path()
                .rsplit('/')
                .next()
                .map(std::string::ToString::to_string)
        })
        .unwrap_or_default()
}

/// Extracts the filename from a `Content-Disposition` header value.
///
/// Takes the text after the first `filename=` and strips one layer of
/// surrounding double quotes. Returns `None` when there is no `filename=`
/// or nothing follows it.
#[must_use]
pub fn content_disposition_filename(header: &str) -> Option<String> {
    let captured = DISPOSITION_FILENAME.captures(header)?.get(1)?.as_str();
    let unquoted = captured.strip_prefix('"').unwrap_or(captured);
    let unquoted = unquoted.strip_suffix('"').unwrap_or(unquoted);
    Some(unquoted.to_string())
}

/// Replaces forbidden characters with `_` and trims spaces and periods from
/// both ends.
///
/// Sanitizing an already sanitized name returns it unchanged.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if FORBIDDEN_CHARS.contains(&c) { '_' } else { c })
        .collect();
    replaced.trim_matches([' ', '.']).to_string()
}

/// Case-insensitive check for a `.pdf` suffix.
pub(crate) fn has_pdf_suffix(value: &str) -> bool {
    value.to_lowercase().ends_with(".pdf")
}
