//! HTTP download pipeline for PDF files.
//!
//! This module provides the pieces the crawl loop chains together for each
//! discovered link.
//!
//! # Features
//!
//! - Streaming downloads written to disk in 8 KiB buffered chunks
//! - Filename derivation from the URL path with a Content-Disposition fallback
//! - Existing files are never overwritten
//! - Integrity check against the announced content length
//! - Classification of failures into retryable and fatal outcomes
//!
//! # Example
//!
//! ```no_run
//! use pdf_crawler::CrawlConfig;
//! use pdf_crawler::download::HttpClient;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new(&CrawlConfig::default())?;
//! let outcome = client
//!     .download_pdf("https://example.com/paper.pdf", Path::new("./downloads"))
//!     .await?;
//! println!("Downloaded: {}", outcome.path().display());
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod error;
pub mod filename;
mod retry;

pub use client::{DownloadOutcome, HttpClient};
pub use error::{ClientBuildError, DownloadError};
pub use filename::{resolve_filename, sanitize_filename};
pub use retry::{AttemptOutcome, FailureType, classify_error};
