//! Crawl target and tunable settings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::download::constants::{
    DISCOVERY_TIMEOUT_SECS, DOWNLOAD_TIMEOUT_SECS, INTER_URL_DELAY, RETRY_DELAY,
};
use crate::user_agent::default_headers;

/// Default number of attempts per discovered URL.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// The listing page to scan and the directory PDFs are saved into.
///
/// Fixed for the lifetime of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    base_url: String,
    save_dir: PathBuf,
}

impl CrawlTarget {
    /// Creates a target from a listing-page URL and a save directory.
    #[must_use]
    pub fn new(base_url: impl Into<String>, save_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            save_dir: save_dir.into(),
        }
    }

    /// The listing-page URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The directory downloads are written to.
    #[must_use]
    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }
}

/// Request headers, retry budget, delays and timeouts for a crawl.
///
/// # Default Values
///
/// - `headers`: browser `User-Agent` only
/// - `max_attempts`: 3
/// - `retry_delay`: 2 seconds
/// - `inter_url_delay`: 1.5 seconds
/// - `discovery_timeout`: 15 seconds
/// - `download_timeout`: 20 seconds
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    headers: BTreeMap<String, String>,
    max_attempts: u32,
    retry_delay: Duration,
    inter_url_delay: Duration,
    discovery_timeout: Duration,
    download_timeout: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            headers: default_headers(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: RETRY_DELAY,
            inter_url_delay: INTER_URL_DELAY,
            discovery_timeout: Duration::from_secs(DISCOVERY_TIMEOUT_SECS),
            download_timeout: Duration::from_secs(DOWNLOAD_TIMEOUT_SECS),
        }
    }
}

impl CrawlConfig {
    /// Replaces the whole header set sent with every request.
    #[must_use]
    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the attempt budget per URL (clamped to at least 1).
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Sets the retry and inter-URL pauses.
    #[must_use]
    pub fn with_delays(mut self, retry_delay: Duration, inter_url_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self.inter_url_delay = inter_url_delay;
        self
    }

    /// Sets the listing-page and download request timeouts.
    #[must_use]
    pub fn with_timeouts(mut self, discovery: Duration, download: Duration) -> Self {
        self.discovery_timeout = discovery;
        self.download_timeout = download;
        self
    }

    #[must_use]
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    #[must_use]
    pub fn inter_url_delay(&self) -> Duration {
        self.inter_url_delay
    }

    #[must_use]
    pub fn discovery_timeout(&self) -> Duration {
        self.discovery_timeout
    }

    #[must_use]
    pub fn download_timeout(&self) -> Duration {
        self.download_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user_agent::BROWSER_USER_AGENT;

    #[test]
    fn test_default_config_matches_fixed_constants() {
        let config = CrawlConfig::default();
        assert_eq!(config.max_attempts(), 3);
        assert_eq!(config.retry_delay(), Duration::from_secs(2));
        assert_eq!(config.inter_url_delay(), Duration::from_millis(1500));
        assert_eq!(config.discovery_timeout(), Duration::from_secs(15));
        assert_eq!(config.download_timeout(), Duration::from_secs(20));
        assert_eq!(
            config.headers().get("User-Agent").map(String::as_str),
            Some(BROWSER_USER_AGENT)
        );
    }

    #[test]
    fn test_with_max_attempts_clamps_zero_to_one() {
        let config = CrawlConfig::default().with_max_attempts(0);
        assert_eq!(config.max_attempts(), 1);
    }

    #[test]
    fn test_with_headers_replaces_defaults() {
        let headers = BTreeMap::from([("X-Token".to_string(), "abc".to_string())]);
        let config = CrawlConfig::default().with_headers(headers);
        assert_eq!(config.headers().len(), 1);
        assert!(config.headers().get("User-Agent").is_none());
    }

    #[test]
    fn test_crawl_target_accessors() {
        let target = CrawlTarget::new("https://example.com/list/", "downloads/pdf");
        assert_eq!(target.base_url(), "https://example.com/list/");
        assert_eq!(target.save_dir(), Path::new("downloads/pdf"));
    }
}
