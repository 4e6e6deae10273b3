//! Discovery of PDF links on the listing page.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::download::HttpClient;
use crate::download::filename::has_pdf_suffix;

#[allow(clippy::expect_used)]
static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("anchor selector is valid")); // Static pattern, safe to panic

/// Fetches `base_url` and returns the absolute URLs of every PDF it links to.
///
/// Never fails: an invalid base URL, a transport error, a non-success status
/// or an unreadable body is logged and yields an empty list.
#[instrument(skip(client), fields(base_url = %base_url))]
pub async fn discover_pdf_links(client: &HttpClient, base_url: &str) -> Vec<String> {
    let base = match Url::parse(base_url) {
        Ok(base) => base,
        Err(e) => {
            warn!(error = %e, "failed to fetch listing page: invalid base URL");
            return Vec::new();
        }
    };

    let html = match client.fetch_page(base_url).await {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "failed to fetch listing page");
            return Vec::new();
        }
    };

    let links = extract_pdf_links(&html, &base);
    info!(count = links.len(), "found PDF links");
    links
}

/// Returns the PDF links in `html`, resolved against `base`, in document order.
///
/// An anchor qualifies when its `href` ends in `.pdf`, ignoring case.
/// Anchors without an `href` are skipped. Duplicates are kept.
#[must_use]
pub fn extract_pdf_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&ANCHOR)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href").unwrap_or("");
            if !has_pdf_suffix(href) {
                return None;
            }
            match base.join(href) {
                Ok(resolved) => Some(resolved.to_string()),
                Err(e) => {
                    debug!(href, error = %e, "skipping unresolvable href");
                    None
                }
            }
        })
        .collect()
}
