//! Run orchestration: resolve, list, rank, then fetch each publication.
//!
//! Every publication ends in one of three states (success, skipped,
//! failed). Per-item errors are logged and recorded; only author
//! resolution, output directory creation and the initial listing abort
//! the run.

mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

pub use error::{ItemError, RunError};

use crate::discover::LinkDiscoverer;
use crate::download::{DownloadOutcome, PdfDownloader, destination_for};
use crate::profile::resolve_author_id;
use crate::publication::{DownloadResult, Publication, RunSummary};
use crate::ranker::{DEFAULT_LIMIT, rank_by_citations};
use crate::scholar::PublicationSource;

/// Default pause between two publications.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

/// Knobs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Directory PDFs are written to; created if missing.
    pub output_dir: PathBuf,
    /// Maximum number of publications to process.
    pub limit: usize,
    /// Pause between consecutive publications.
    pub delay: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./papers"),
            limit: DEFAULT_LIMIT,
            delay: DEFAULT_DELAY,
        }
    }
}

/// Drives a run from a profile URL to a [`RunSummary`].
pub struct Orchestrator {
    source: Box<dyn PublicationSource>,
    discoverer: LinkDiscoverer,
    downloader: PdfDownloader,
    settings: PipelineSettings,
}

impl Orchestrator {
    /// Assembles an orchestrator from its collaborators.
    #[must_use]
    pub fn new(
        source: Box<dyn PublicationSource>,
        discoverer: LinkDiscoverer,
        downloader: PdfDownloader,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            source,
            discoverer,
            downloader,
            settings,
        }
    }

    /// Downloads the most-cited publications of the profile at `profile_url`.
    ///
    /// # Errors
    ///
    /// Returns [`RunError`] when the author id cannot be extracted, the
    /// output directory cannot be created, or the publication list cannot be
    /// fetched. Failures of individual publications are recorded in the
    /// summary instead.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn run(&self, profile_url: &str) -> Result<RunSummary, RunError> {
        let author = resolve_author_id(profile_url)?;
        info!(author = %author, "resolved author id");

        let output_dir = &self.settings.output_dir;
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|source| RunError::OutputDir {
                path: output_dir.clone(),
                source,
            })?;

        let publications = self.source.list_publications(&author).await?;
        let listed = publications.len();
        let ranked = rank_by_citations(publications, self.settings.limit);
        let selected = ranked.len();
        info!(listed, selected, limit = self.settings.limit, "publications ranked");

        let mut summary = RunSummary::new(output_dir.clone());
        for (index, publication) in ranked.into_iter().enumerate() {
            info!(
                rank = index + 1,
                of = selected,
                citations = publication.citation_count,
                title = %publication.title,
                "processing publication"
            );
            summary.record(self.process(publication).await);

            if index + 1 < selected && !self.settings.delay.is_zero() {
                debug!(delay = ?self.settings.delay, "pausing");
                tokio::time::sleep(self.settings.delay).await;
            }
        }

        info!(
            available = summary.available(),
            attempted = summary.attempted(),
            failed = summary.failed(),
            "run finished"
        );
        Ok(summary)
    }

    async fn process(&self, mut publication: Publication) -> DownloadResult {
        let destination = destination_for(&self.settings.output_dir, &publication.title);
        if destination.exists() {
            info!(path = %destination.display(), "already downloaded, skipping");
            return DownloadResult::skipped(publication.title, &destination);
        }

        match self.fetch(&mut publication, &destination).await {
            Ok(DownloadOutcome::Saved { path, bytes }) => {
                info!(path = %path.display(), bytes, "saved");
                DownloadResult::success(publication.title, &path)
            }
            Ok(DownloadOutcome::AlreadyPresent { path }) => {
                DownloadResult::skipped(publication.title, &path)
            }
            Err(error) => {
                warn!(title = %publication.title, error = %error, "publication failed");
                DownloadResult::failed(publication.title, error)
            }
        }
    }

    async fn fetch(
        &self,
        publication: &mut Publication,
        destination: &Path,
    ) -> Result<DownloadOutcome, ItemError> {
        if let Err(error) = self.source.fill_links(publication).await {
            warn!(error = %error, "could not read publication details");
        }

        let url = self
            .candidate_url(publication)
            .await
            .ok_or(ItemError::NoLinkFound)?;
        Ok(self.downloader.download(&url, destination).await?)
    }

    /// Landing-page discovery first, then the eprint link.
    async fn candidate_url(&self, publication: &Publication) -> Option<String> {
        if let Some(landing) = publication.landing_page_url.as_deref()
            && let Some(link) = self.discoverer.discover(landing).await
        {
            return Some(link.into());
        }

        let eprint = publication.eprint_url.clone();
        if let Some(url) = &eprint {
            info!(url = %url, "falling back to eprint link");
        }
        eprint
    }
}
