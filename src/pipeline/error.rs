//! Error types for a pipeline run.

use std::path::PathBuf;

use thiserror::Error;

use crate::download::DownloadError;
use crate::profile::ProfileError;
use crate::scholar::MetadataFetchError;

/// Errors that abort a whole run.
#[derive(Debug, Error)]
pub enum RunError {
    /// No author identifier could be extracted from the profile URL.
    #[error(transparent)]
    InvalidProfileUrl(#[from] ProfileError),

    /// The publication list could not be retrieved.
    #[error(transparent)]
    MetadataFetch(#[from] MetadataFetchError),

    /// The output directory could not be created.
    #[error("cannot create output directory {path}: {source}")]
    OutputDir {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
}

/// Per-publication failures. These are recorded and the run continues.
#[derive(Debug, Error)]
pub enum ItemError {
    /// Neither the landing page nor the eprint link gave a URL to try.
    #[error("no PDF link found")]
    NoLinkFound,

    /// The candidate URL could not be downloaded as a PDF.
    #[error(transparent)]
    Download(#[from] DownloadError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_error_messages() {
        assert_eq!(ItemError::NoLinkFound.to_string(), "no PDF link found");

        let err = ItemError::from(DownloadError::http_status("https://x.test/a.pdf", 403));
        assert!(err.to_string().contains("403"));
    }

    #[test]
    fn test_output_dir_error_names_path() {
        let err = RunError::OutputDir {
            path: PathBuf::from("/readonly/papers"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/readonly/papers"));
        assert!(msg.contains("denied"));
    }
}
