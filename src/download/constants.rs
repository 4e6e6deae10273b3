//! Constants for the crawl pipeline (timeouts, delays, chunking).

use std::time::Duration;

/// Timeout for fetching the listing page.
pub const DISCOVERY_TIMEOUT_SECS: u64 = 15;

/// Timeout for a single PDF download request.
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 20;

/// Pause between failed attempts for the same URL.
pub const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Pause after each URL before moving on to the next one.
pub const INTER_URL_DELAY: Duration = Duration::from_millis(1500);

/// Write buffer size used while streaming a response body to disk.
pub const CHUNK_SIZE: usize = 8192;
