//! Publication listing from the author-metadata provider.
//!
//! - [`PublicationSource`] - Async trait the orchestrator lists and fills through
//! - [`ScholarSource`] - Google Scholar profile implementation
//!
//! Listing pages through the profile table 100 rows at a time. Landing-page
//! and eprint links live on per-publication detail pages, so they are filled
//! separately and only for the publications that survive ranking.

mod error;
mod parse;

pub use error::MetadataFetchError;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, instrument};
use url::Url;

use crate::http::{self, TimeoutPolicy};
use crate::profile::{AUTHOR_QUERY_PARAM, AuthorId};
use crate::publication::Publication;

/// Public Google Scholar host.
pub const DEFAULT_SCHOLAR_BASE_URL: &str = "https://scholar.google.com";

/// Rows requested per profile page (provider maximum).
pub const PROFILE_PAGE_SIZE: usize = 100;

/// Upper bound on profile pages fetched for one author.
pub const MAX_PROFILE_PAGES: usize = 50;

/// Default timeout for provider requests (30 seconds).
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of an author's publications.
///
/// # Object Safety
///
/// This trait uses `async_trait` so the orchestrator can hold a
/// `Box<dyn PublicationSource>`.
#[async_trait]
pub trait PublicationSource: Send + Sync {
    /// Returns the source name used in logs.
    fn name(&self) -> &str;

    /// Lists every publication of `author`, in provider order.
    async fn list_publications(
        &self,
        author: &AuthorId,
    ) -> Result<Vec<Publication>, MetadataFetchError>;

    /// Completes the links of one listed publication.
    ///
    /// Links already present are kept. The default does nothing, for sources
    /// whose listing is already complete.
    async fn fill_links(&self, _publication: &mut Publication) -> Result<(), MetadataFetchError> {
        Ok(())
    }
}

/// Google Scholar profile scraper.
#[derive(Debug, Clone)]
pub struct ScholarSource {
    client: Client,
    base_url: Url,
}

impl ScholarSource {
    /// Creates a source for `base_url` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataFetchError`] when the base URL is not an absolute
    /// http(s) URL or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, MetadataFetchError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .ok_or_else(|| MetadataFetchError::invalid_url(base_url))?;
        let client = http::build_client(TimeoutPolicy::Total(timeout))
            .map_err(|source| MetadataFetchError::Client { source })?;
        Ok(Self { client, base_url })
    }

    fn profile_page_url(&self, author: &AuthorId, offset: usize) -> Result<Url, MetadataFetchError> {
        let mut url = self
            .base_url
            .join("citations")
            .map_err(|_| MetadataFetchError::invalid_url(self.base_url.as_str()))?;
        url.query_pairs_mut()
            .append_pair(AUTHOR_QUERY_PARAM, author.as_str())
            .append_pair("hl", "en")
            .append_pair("cstart", &offset.to_string())
            .append_pair("pagesize", &PROFILE_PAGE_SIZE.to_string());
        Ok(url)
    }

    async fn fetch_html(&self, url: &Url) -> Result<String, MetadataFetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| MetadataFetchError::from_request(url.as_str(), e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(MetadataFetchError::http_status(url.as_str(), status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| MetadataFetchError::from_request(url.as_str(), e))
    }
}

#[async_trait]
impl PublicationSource for ScholarSource {
    fn name(&self) -> &'static str {
        "google-scholar"
    }

    #[instrument(skip(self), fields(source = "google-scholar", author = %author))]
    async fn list_publications(
        &self,
        author: &AuthorId,
    ) -> Result<Vec<Publication>, MetadataFetchError> {
        let mut publications = Vec::new();

        for page in 0..MAX_PROFILE_PAGES {
            let url = self.profile_page_url(author, page * PROFILE_PAGE_SIZE)?;
            let html = self.fetch_html(&url).await?;
            let rows = parse::parse_profile_rows(&html, &url, publications.len())
                .map_err(|reason| MetadataFetchError::parse(url.as_str(), reason))?;

            let row_count = rows.len();
            debug!(page, rows = row_count, "profile page parsed");
            publications.extend(rows);

            if row_count < PROFILE_PAGE_SIZE {
                break;
            }
        }

        info!(count = publications.len(), "publication list retrieved");
        Ok(publications)
    }

    #[instrument(skip(self, publication), fields(title = %publication.title))]
    async fn fill_links(&self, publication: &mut Publication) -> Result<(), MetadataFetchError> {
        let Some(detail) = publication.detail_url.as_deref() else {
            return Ok(());
        };
        let url = Url::parse(detail).map_err(|_| MetadataFetchError::invalid_url(detail))?;
        let html = self.fetch_html(&url).await?;
        let links = parse::parse_detail_links(&html, &url)
            .map_err(|reason| MetadataFetchError::parse(url.as_str(), reason))?;

        if publication.landing_page_url.is_none() {
            publication.landing_page_url = links.landing_page_url;
        }
        if publication.eprint_url.is_none() {
            publication.eprint_url = links.eprint_url;
        }
        debug!(
            landing_page = ?publication.landing_page_url,
            eprint = ?publication.eprint_url,
            "publication links filled"
        );
        Ok(())
    }
}
