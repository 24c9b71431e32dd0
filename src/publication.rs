//! Publication records and per-item download results.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// One publication as reported by the metadata provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    /// Publication title.
    pub title: String,
    /// Number of citations reported by the provider.
    pub citation_count: u64,
    /// Publisher or repository page for the publication.
    pub landing_page_url: Option<String>,
    /// Direct full-text link offered by the provider.
    pub eprint_url: Option<String>,
    /// Provider detail page used to fill the two links above.
    pub detail_url: Option<String>,
}

impl Publication {
    /// Creates a publication with no links.
    #[must_use]
    pub fn new(title: impl Into<String>, citation_count: u64) -> Self {
        Self {
            title: title.into(),
            citation_count,
            landing_page_url: None,
            eprint_url: None,
            detail_url: None,
        }
    }

    /// Sets the landing page URL.
    #[must_use]
    pub fn with_landing_page(mut self, url: impl Into<String>) -> Self {
        self.landing_page_url = Some(url.into());
        self
    }

    /// Sets the eprint URL.
    #[must_use]
    pub fn with_eprint(mut self, url: impl Into<String>) -> Self {
        self.eprint_url = Some(url.into());
        self
    }

    /// Sets the provider detail page URL.
    #[must_use]
    pub fn with_detail_page(mut self, url: impl Into<String>) -> Self {
        self.detail_url = Some(url.into());
        self
    }
}

/// Terminal state of one publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    /// PDF downloaded during this run.
    Success,
    /// Destination file already existed; nothing fetched.
    Skipped,
    /// No usable PDF could be fetched.
    Failed,
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        })
    }
}

/// Outcome recorded for one publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadResult {
    /// Publication title.
    pub title: String,
    /// Terminal state.
    pub status: DownloadStatus,
    /// Local file, set for successes and skips.
    pub local_path: Option<PathBuf>,
    /// Failure reason, set for failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DownloadResult {
    /// A publication downloaded to `path`.
    #[must_use]
    pub fn success(title: impl Into<String>, path: &Path) -> Self {
        Self {
            title: title.into(),
            status: DownloadStatus::Success,
            local_path: Some(path.to_path_buf()),
            error: None,
        }
    }

    /// A publication whose file was already present at `path`.
    #[must_use]
    pub fn skipped(title: impl Into<String>, path: &Path) -> Self {
        Self {
            title: title.into(),
            status: DownloadStatus::Skipped,
            local_path: Some(path.to_path_buf()),
            error: None,
        }
    }

    /// A publication that could not be downloaded.
    #[must_use]
    pub fn failed(title: impl Into<String>, error: impl fmt::Display) -> Self {
        Self {
            title: title.into(),
            status: DownloadStatus::Failed,
            local_path: None,
            error: Some(error.to_string()),
        }
    }
}

/// Results of a whole run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Output directory the run wrote to.
    pub output_dir: PathBuf,
    /// Per-publication results.
    pub results: Vec<DownloadResult>,
}

impl RunSummary {
    /// Creates an empty summary for `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            results: Vec::new(),
        }
    }

    /// Appends one result.
    pub fn record(&mut self, result: DownloadResult) {
        self.results.push(result);
    }

    /// Number of publications processed.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.results.len()
    }

    /// Number of PDFs downloaded during this run.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.count(DownloadStatus::Success)
    }

    /// Number of publications already present on disk.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(DownloadStatus::Skipped)
    }

    /// Number of publications with no PDF.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(DownloadStatus::Failed)
    }

    /// Publications that have a local PDF after this run.
    #[must_use]
    pub fn available(&self) -> usize {
        self.succeeded() + self.skipped()
    }

    fn count(&self, status: DownloadStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}
