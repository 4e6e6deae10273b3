//! PDF Crawler Library
//!
//! Finds every PDF linked from a single listing page and downloads each one
//! into a local directory, retrying failed downloads a fixed number of times
//! and never overwriting files that already exist.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Crawl target and tunable settings
//! - [`discover`] - Listing-page fetch and PDF link extraction
//! - [`download`] - Filename resolution and streaming downloads
//! - [`crawler`] - Sequential retry loop over discovered links

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod crawler;
pub mod discover;
pub mod download;
pub mod user_agent;

// Re-export commonly used types
pub use config::{CrawlConfig, CrawlTarget, DEFAULT_MAX_ATTEMPTS};
pub use crawler::{CrawlError, CrawlReport, Crawler, PdfFetcher, UrlReport, UrlState};
pub use discover::{discover_pdf_links, extract_pdf_links};
pub use download::{
    AttemptOutcome, DownloadError, DownloadOutcome, HttpClient, resolve_filename,
    sanitize_filename,
};
