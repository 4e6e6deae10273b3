//! Classification of download attempts for the crawl retry loop.
//!
//! Every attempt ends in an [`AttemptOutcome`]. The crawl loop retries
//! [`AttemptOutcome::RetryableFailure`] until the attempt budget runs out and
//! gives up immediately on [`AttemptOutcome::FatalFailure`].

use super::{DownloadError, DownloadOutcome};

/// Classification of download failure types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureType {
    /// May succeed on another attempt.
    ///
    /// Examples: network errors, timeouts, any non-2xx status, short bodies,
    /// disk write errors.
    Transient,

    /// Will fail the same way on every attempt.
    ///
    /// Examples: malformed URL, URL with no usable filename.
    Permanent,
}

/// Result of one download attempt.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// The PDF was saved or already present.
    Success(DownloadOutcome),
    /// The attempt failed; another one may succeed.
    RetryableFailure(DownloadError),
    /// The attempt failed in a way retrying cannot fix.
    FatalFailure(DownloadError),
}

impl AttemptOutcome {
    /// Wraps a downloader result, classifying any error.
    #[must_use]
    pub fn from_result(result: Result<DownloadOutcome, DownloadError>) -> Self {
        match result {
            Ok(outcome) => Self::Success(outcome),
            Err(error) => match classify_error(&error) {
                FailureType::Transient => Self::RetryableFailure(error),
                FailureType::Permanent => Self::FatalFailure(error),
            },
        }
    }
}

/// Classifies a download error.
///
/// Every HTTP status failure counts as transient, 4xx included.
#[must_use]
pub fn classify_error(error: &DownloadError) -> FailureType {
    match error {
        DownloadError::Network { .. }
        | DownloadError::Timeout { .. }
        | DownloadError::HttpStatus { .. }
        | DownloadError::Io { .. }
        | DownloadError::Integrity { .. } => FailureType::Transient,
        DownloadError::InvalidUrl { .. } | DownloadError::EmptyFilename { .. } => {
            FailureType::Permanent
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_classify_http_status_is_transient() {
        for status in [404, 429, 500, 503] {
            let error = DownloadError::http_status("https://example.com/a.pdf", status);
            assert_eq!(classify_error(&error), FailureType::Transient, "status {status}");
        }
    }

    #[test]
    fn test_classify_integrity_is_transient() {
        let error = DownloadError::integrity(PathBuf::from("/tmp/a.pdf"), 100, 80);
        assert_eq!(classify_error(&error), FailureType::Transient);
    }

    #[test]
    fn test_classify_timeout_and_io_are_transient() {
        assert_eq!(
            classify_error(&DownloadError::timeout("https://example.com/a.pdf")),
            FailureType::Transient
        );
        let io = std::io::Error::other("disk full");
        assert_eq!(
            classify_error(&DownloadError::io(PathBuf::from("/tmp/a.pdf"), io)),
            FailureType::Transient
        );
    }

    #[test]
    fn test_classify_invalid_url_and_empty_filename_are_permanent() {
        assert_eq!(
            classify_error(&DownloadError::invalid_url("nope")),
            FailureType::Permanent
        );
        assert_eq!(
            classify_error(&DownloadError::empty_filename("https://example.com/")),
            FailureType::Permanent
        );
    }

    #[test]
    fn test_attempt_outcome_from_result() {
        let saved = DownloadOutcome::Saved {
            path: PathBuf::from("/tmp/a.pdf"),
            bytes: 3,
        };
        assert!(matches!(
            AttemptOutcome::from_result(Ok(saved)),
            AttemptOutcome::Success(_)
        ));
        assert!(matches!(
            AttemptOutcome::from_result(Err(DownloadError::http_status("u", 500))),
            AttemptOutcome::RetryableFailure(_)
        ));
        assert!(matches!(
            AttemptOutcome::from_result(Err(DownloadError::invalid_url("u"))),
            AttemptOutcome::FatalFailure(_)
        ));
    }
}
