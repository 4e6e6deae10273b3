//! Crawl loop: discover links once, then download each with bounded retries.
//!
//! # Overview
//!
//! [`Crawler::run`] creates the save directory, asks its [`PdfFetcher`] for
//! the PDF links on the listing page, and walks them strictly one after the
//! other. Each URL moves through
//!
//! ```text
//! Pending -> Attempting -> Succeeded
//!                       -> attempt failed -> Attempting (budget left)
//!                                         -> PermanentlyFailed
//! ```
//!
//! Retryable failures wait the retry delay before the next attempt; fatal
//! failures end the URL at once. Every URL is followed by the inter-URL delay,
//! whatever its outcome. Per-URL failures never abort the run.
//!
//! # Example
//!
//! ```no_run
//! use pdf_crawler::{CrawlConfig, CrawlTarget, Crawler};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let target = CrawlTarget::new("https://example.com/papers/", "downloads");
//! let crawler = Crawler::with_http_client(target, CrawlConfig::default())?;
//! let report = crawler.run().await?;
//! println!("saved {}, failed {}", report.succeeded(), report.failed());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, error, info, instrument, warn};

use crate::config::{CrawlConfig, CrawlTarget};
use crate::discover::discover_pdf_links;
use crate::download::{
    AttemptOutcome, ClientBuildError, DownloadError, DownloadOutcome, HttpClient,
};

/// Error type for crawl setup.
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    /// The save directory could not be created.
    #[error("failed to create save directory {path}: {source}")]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Source of listing-page links and PDF downloads for the crawl loop.
#[async_trait]
pub trait PdfFetcher: Send + Sync {
    /// Returns the absolute PDF URLs found on `base_url`, or none on failure.
    async fn discover(&self, base_url: &str) -> Vec<String>;

    /// Downloads one PDF into `save_dir`.
    async fn fetch_pdf(&self, url: &str, save_dir: &Path)
    -> Result<DownloadOutcome, DownloadError>;
}

#[async_trait]
impl PdfFetcher for HttpClient {
    async fn discover(&self, base_url: &str) -> Vec<String> {
        discover_pdf_links(self, base_url).await
    }

    async fn fetch_pdf(
        &self,
        url: &str,
        save_dir: &Path,
    ) -> Result<DownloadOutcome, DownloadError> {
        self.download_pdf(url, save_dir).await
    }
}

/// Final state of one discovered URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlState {
    /// The PDF was saved, or a file already existed at its path.
    Succeeded(DownloadOutcome),
    /// Every attempt failed, or a fatal failure stopped retries.
    PermanentlyFailed,
}

/// One attempt at downloading a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    /// 1-indexed attempt number.
    pub attempt: u32,
    /// Error message when the attempt failed.
    pub error: Option<String>,
}

/// Outcome of processing one discovered URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlReport {
    pub url: String,
    pub state: UrlState,
    pub attempts: Vec<AttemptRecord>,
}

impl UrlReport {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        matches!(self.state, UrlState::Succeeded(_))
    }
}

/// Per-URL results of a crawl run, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    pub urls: Vec<UrlReport>,
}

impl CrawlReport {
    /// Number of URLs processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.urls.len()
    }

    /// URLs that ended saved or already present.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.urls.iter().filter(|u| u.succeeded()).count()
    }

    /// URLs skipped because the file already existed.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.urls
            .iter()
            .filter(|u| matches!(u.state, UrlState::Succeeded(DownloadOutcome::AlreadyExists { .. })))
            .count()
    }

    /// URLs that permanently failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }
}

/// Sequential PDF crawler for a single listing page.
pub struct Crawler {
    target: CrawlTarget,
    config: CrawlConfig,
    fetcher: Box<dyn PdfFetcher>,
}

impl std::fmt::Debug for Crawler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crawler")
            .field("target", &self.target)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Crawler {
    /// Creates a crawler that uses `fetcher` for discovery and downloads.
    #[must_use]
    pub fn new(target: CrawlTarget, config: CrawlConfig, fetcher: Box<dyn PdfFetcher>) -> Self {
        Self {
            target,
            config,
            fetcher,
        }
    }

    /// Creates a crawler backed by an [`HttpClient`] built from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError`] if the configured headers are invalid.
    pub fn with_http_client(
        target: CrawlTarget,
        config: CrawlConfig,
    ) -> Result<Self, ClientBuildError> {
        let client = HttpClient::new(&config)?;
        Ok(Self::new(target, config, Box::new(client)))
    }

    #[must_use]
    pub fn target(&self) -> &CrawlTarget {
        &self.target
    }

    /// Runs the crawl to completion.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlError::CreateDir`] if the save directory cannot be
    /// created. Individual download failures do NOT cause this method to
    /// error; they are logged and recorded in the report.
    #[instrument(skip(self), fields(base_url = %self.target.base_url(), save_dir = %self.target.save_dir().display()))]
    pub async fn run(&self) -> Result<CrawlReport, CrawlError> {
        let save_dir = self.target.save_dir();
        tokio::fs::create_dir_all(save_dir)
            .await
            .map_err(|source| CrawlError::CreateDir {
                path: save_dir.to_path_buf(),
                source,
            })?;

        let urls = self.fetcher.discover(self.target.base_url()).await;
        let total = urls.len();
        info!(count = total, "discovered PDF files");

        let mut report = CrawlReport::default();
        for (index, url) in urls.into_iter().enumerate() {
            info!(item = index + 1, total, url = %url, "processing");
            report.urls.push(self.process_url(url, save_dir).await);
            tokio::time::sleep(self.config.inter_url_delay()).await;
        }

        Ok(report)
    }

    async fn process_url(&self, url: String, save_dir: &Path) -> UrlReport {
        let max_attempts = self.config.max_attempts();
        let mut attempts = Vec::new();

        for attempt in 1..=max_attempts {
            debug!(url = %url, attempt, max_attempts, "attempting download");
            let result = self.fetcher.fetch_pdf(&url, save_dir).await;

            match AttemptOutcome::from_result(result) {
                AttemptOutcome::Success(outcome) => {
                    match &outcome {
                        DownloadOutcome::Saved { path, bytes } => {
                            info!(url = %url, path = %path.display(), bytes, "saved PDF");
                        }
                        DownloadOutcome::AlreadyExists { path } => {
                            info!(url = %url, path = %path.display(), "already exists, skipped");
                        }
                    }
                    attempts.push(AttemptRecord {
                        attempt,
                        error: None,
                    });
                    return UrlReport {
                        url,
                        state: UrlState::Succeeded(outcome),
                        attempts,
                    };
                }
                AttemptOutcome::RetryableFailure(e) => {
                    warn!(url = %url, attempt, error = %e, "download failed");
                    attempts.push(AttemptRecord {
                        attempt,
                        error: Some(e.to_string()),
                    });
                    tokio::time::sleep(self.config.retry_delay()).await;
                }
                AttemptOutcome::FatalFailure(e) => {
                    warn!(url = %url, attempt, error = %e, "download failed, not retrying");
                    attempts.push(AttemptRecord {
                        attempt,
                        error: Some(e.to_string()),
                    });
                    break;
                }
            }
        }

        error!(url = %url, attempts = attempts.len(), "permanently failed");
        UrlReport {
            url,
            state: UrlState::PermanentlyFailed,
            attempts,
        }
    }
}
