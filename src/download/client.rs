//! HTTP client wrapper for fetching the listing page and streaming PDFs.
//!
//! This module provides the `HttpClient` struct which sends every request
//! with the configured header set, and writes PDF bodies to disk chunk by
//! chunk. The download timeout bounds the wait for response headers and each
//! wait for the next body chunk, not the transfer as a whole.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::{Stream, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, HeaderMap, HeaderName, HeaderValue};
use tokio::fs::OpenOptions;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument, trace};
use url::Url;

use super::constants::CHUNK_SIZE;
use super::error::{ClientBuildError, DownloadError};
use super::filename::resolve_filename;
use crate::config::CrawlConfig;

/// HTTP client shared by link discovery and PDF downloads.
///
/// Built once per run; the underlying `reqwest::Client` pools connections,
/// but each response is owned by the call that made it and released when
/// that call returns.
///
/// # Example
///
/// ```no_run
/// use pdf_crawler::CrawlConfig;
/// use pdf_crawler::download::{DownloadOutcome, HttpClient};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new(&CrawlConfig::default())?;
/// match client.download_pdf("https://example.com/file.pdf", Path::new("./downloads")).await? {
///     DownloadOutcome::Saved { path, .. } => println!("Saved {}", path.display()),
///     DownloadOutcome::AlreadyExists { path } => println!("Kept {}", path.display()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    discovery_timeout: Duration,
    download_timeout: Duration,
}

/// What a successful call to [`HttpClient::download_pdf`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The body was written to `path`.
    Saved {
        /// Where the PDF was written.
        path: PathBuf,
        /// Number of bytes written.
        bytes: u64,
    },
    /// A file already existed at `path`; it was left untouched.
    AlreadyExists {
        /// The existing file.
        path: PathBuf,
    },
}

impl DownloadOutcome {
    /// The path the outcome refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Saved { path, .. } | Self::AlreadyExists { path } => path,
        }
    }
}

impl HttpClient {
    /// Creates a client that sends `config`'s headers with every request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError`] if a configured header name or value is
    /// not valid HTTP, or if reqwest rejects the builder configuration.
    #[instrument(level = "debug", skip(config), fields(headers = config.headers().len()))]
    pub fn new(config: &CrawlConfig) -> Result<Self, ClientBuildError> {
        let mut headers = HeaderMap::new();
        for (name, value) in config.headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ClientBuildError::InvalidHeaderName { name: name.clone() })?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| ClientBuildError::InvalidHeaderValue { name: name.clone() })?;
            headers.insert(header_name, header_value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            discovery_timeout: config.discovery_timeout(),
            download_timeout: config.download_timeout(),
        })
    }

    /// Fetches the listing page and returns its body as text.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if the URL is invalid, the request fails, the
    /// server answers with a non-success status, or the body cannot be read.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_page(&self, url: &str) -> Result<String, DownloadError> {
        Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;
        let response = self.send_get(url, self.discovery_timeout).await?;
        tokio::time::timeout(self.discovery_timeout, response.text())
            .await
            .map_err(|_| DownloadError::timeout(url))?
            .map_err(|e| DownloadError::from_transport(url, e))
    }

    /// Streams the PDF at `url` into `save_dir`.
    ///
    /// The filename comes from [`resolve_filename`] once response headers are
    /// available. An existing file at the resolved path is never touched.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is invalid
    /// - The request fails (network error, timeout)
    /// - The server returns an error status (4xx, 5xx)
    /// - No filename can be derived
    /// - Writing to disk fails
    /// - Fewer or more bytes arrive than `content-length` announced
    #[instrument(skip(self), fields(url = %url, save_dir = %save_dir.display()))]
    pub async fn download_pdf(
        &self,
        url: &str,
        save_dir: &Path,
    ) -> Result<DownloadOutcome, DownloadError> {
        debug!("starting download");
        Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;

        let response = self.send_get(url, self.download_timeout).await?;

        let content_disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
        let filename = resolve_filename(url, content_disposition.as_deref());
        if filename.is_empty() {
            return Err(DownloadError::empty_filename(url));
        }
        let file_path = save_dir.join(&filename);
        debug!(filename = %filename, path = %file_path.display(), "resolved output path");

        let expected_bytes = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        save_body(
            response.bytes_stream(),
            url,
            &file_path,
            expected_bytes,
            self.download_timeout,
        )
        .await
    }

    /// Sends a GET and waits at most `timeout` for the response headers.
    async fn send_get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<reqwest::Response, DownloadError> {
        let response = tokio::time::timeout(timeout, self.client.get(url).send())
            .await
            .map_err(|_| DownloadError::timeout(url))?
            .map_err(|e| DownloadError::from_transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        Ok(response)
    }
}

/// Writes `stream` to a new file at `file_path`.
///
/// Returns [`DownloadOutcome::AlreadyExists`] without reading the stream when
/// the path is taken. A file left incomplete by a stream error, a stalled
/// stream or a size mismatch is removed before the error is returned.
async fn save_body<S, B>(
    stream: S,
    url: &str,
    file_path: &Path,
    expected_bytes: Option<u64>,
    read_timeout: Duration,
) -> Result<DownloadOutcome, DownloadError>
where
    S: Stream<Item = Result<B, reqwest::Error>> + Unpin,
    B: AsRef<[u8]>,
{
    let file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(file_path)
        .await
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            info!(path = %file_path.display(), "file already exists, skipping");
            return Ok(DownloadOutcome::AlreadyExists {
                path: file_path.to_path_buf(),
            });
        }
        Err(e) => return Err(DownloadError::io(file_path, e)),
    };

    let written = match stream_to_file(file, stream, url, file_path, expected_bytes, read_timeout)
        .await
    {
        Ok(written) => verify_integrity(file_path, expected_bytes, written).map(|()| written),
        Err(e) => Err(e),
    };

    match written {
        Ok(bytes) => {
            info!(path = %file_path.display(), bytes, "saved");
            Ok(DownloadOutcome::Saved {
                path: file_path.to_path_buf(),
                bytes,
            })
        }
        Err(e) => {
            debug!(path = %file_path.display(), "cleaning up partial file after error");
            if let Err(remove_err) = tokio::fs::remove_file(file_path).await {
                debug!(
                    path = %file_path.display(),
                    error = %remove_err,
                    "failed to remove partial file"
                );
            }
            Err(e)
        }
    }
}

/// Copies `stream` into `file`, failing with [`DownloadError::Timeout`] when
/// no chunk arrives within `read_timeout`.
async fn stream_to_file<S, B>(
    file: tokio::fs::File,
    mut stream: S,
    url: &str,
    file_path: &Path,
    expected_bytes: Option<u64>,
    read_timeout: Duration,
) -> Result<u64, DownloadError>
where
    S: Stream<Item = Result<B, reqwest::Error>> + Unpin,
    B: AsRef<[u8]>,
{
    let mut writer = BufWriter::with_capacity(CHUNK_SIZE, file);
    let total = expected_bytes.filter(|&n| n > 0);
    let progress = download_progress_bar(file_path, total);
    let mut bytes_written: u64 = 0;

    loop {
        let next = tokio::time::timeout(read_timeout, stream.next())
            .await
            .map_err(|_| DownloadError::timeout(url))?;
        let Some(chunk_result) = next else {
            break;
        };
        let chunk = chunk_result.map_err(|e| DownloadError::from_transport(url, e))?;
        let chunk = chunk.as_ref();
        if chunk.is_empty() {
            continue;
        }

        writer
            .write_all(chunk)
            .await
            .map_err(|e| DownloadError::io(file_path, e))?;

        bytes_written += chunk.len() as u64;
        progress.set_position(bytes_written);
        if let Some(total) = total {
            #[allow(clippy::cast_precision_loss)]
            let percent = bytes_written as f64 / total as f64 * 100.0;
            trace!(bytes_written, total, percent = %format!("{percent:.1}"), "progress");
        }
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path, e))?;
    progress.finish_and_clear();

    Ok(bytes_written)
}

/// Fails when a known, nonzero expected size differs from what was written.
fn verify_integrity(
    file_path: &Path,
    expected_bytes: Option<u64>,
    actual_bytes: u64,
) -> Result<(), DownloadError> {
    match expected_bytes {
        Some(expected) if expected > 0 && expected != actual_bytes => Err(
            DownloadError::integrity(file_path, expected, actual_bytes),
        ),
        _ => Ok(()),
    }
}

fn download_progress_bar(file_path: &Path, total: Option<u64>) -> ProgressBar {
    let Some(total) = total else {
        return ProgressBar::hidden();
    };
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template("{msg} [{bar:30}] {percent}% ({bytes}/{total_bytes})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    bar.set_message(format!("Downloading {name}"));
    bar
}
