//! Constants for the download module (timeouts, chunking).

use std::time::Duration;

/// Default per-read timeout for PDF downloads (60 seconds).
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Size of the pieces the response body is written to disk in.
pub const DOWNLOAD_CHUNK_SIZE: usize = 1024;

/// Width of the progress bar label, in characters.
pub(crate) const PROGRESS_LABEL_CHARS: usize = 30;
