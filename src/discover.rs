//! PDF link discovery on publication landing pages.
//!
//! The landing page is fetched once and its anchors are scanned in document
//! order. The first `href` that ends in `.pdf` or mentions `pdf` anywhere
//! (case-insensitive) is taken and resolved against the page URL.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::http::{self, TimeoutPolicy};

/// Default timeout for landing page requests (30 seconds).
pub const DEFAULT_PAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while fetching a landing page.
///
/// Never fatal: the orchestrator logs them and falls back to the eprint link.
#[derive(Debug, Error)]
pub enum PageFetchError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching landing page {url}: {source}")]
    Network {
        /// The page URL.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching landing page {url}")]
    Timeout {
        /// The page URL.
        url: String,
    },

    /// Page answered with a status other than 200.
    #[error("HTTP {status} fetching landing page {url}")]
    HttpStatus {
        /// The page URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The landing page URL is malformed.
    #[error("invalid landing page URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// The HTTP client could not be constructed.
    #[error("could not build landing page HTTP client: {source}")]
    Client {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl PageFetchError {
    fn from_request(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Network {
                url: url.to_string(),
                source,
            }
        }
    }
}

/// Finds candidate PDF links on landing pages.
#[derive(Debug, Clone)]
pub struct LinkDiscoverer {
    client: Client,
}

impl LinkDiscoverer {
    /// Creates a discoverer whose page requests must finish within `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`PageFetchError::Client`] when the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, PageFetchError> {
        let client = http::build_client(TimeoutPolicy::Total(timeout))
            .map_err(|source| PageFetchError::Client { source })?;
        Ok(Self { client })
    }

    /// Returns the first PDF-looking link on `page_url`, or `None`.
    ///
    /// Fetch failures are logged and reported as `None`.
    #[instrument(skip(self), fields(page = %page_url))]
    pub async fn discover(&self, page_url: &str) -> Option<Url> {
        match self.fetch_pdf_link(page_url).await {
            Ok(Some(link)) => {
                debug!(link = %link, "PDF link found on landing page");
                Some(link)
            }
            Ok(None) => {
                debug!("no PDF link on landing page");
                None
            }
            Err(error) => {
                warn!(error = %error, "Error fetching publication page");
                None
            }
        }
    }

    /// Fetches `page_url` and scans it for a PDF link.
    ///
    /// Links are resolved against the final URL after redirects.
    ///
    /// # Errors
    ///
    /// Returns [`PageFetchError`] when the URL is invalid, the request fails
    /// or times out, or the page answers with a status other than 200.
    pub async fn fetch_pdf_link(&self, page_url: &str) -> Result<Option<Url>, PageFetchError> {
        let parsed = Url::parse(page_url).map_err(|_| PageFetchError::InvalidUrl {
            url: page_url.to_string(),
        })?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| PageFetchError::from_request(page_url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(PageFetchError::HttpStatus {
                url: page_url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| PageFetchError::from_request(page_url, e))?;

        Ok(find_pdf_link(&body, &final_url))
    }
}

/// Returns the first anchor `href` in `html` that looks like a PDF link,
/// resolved against `base`.
///
/// An `href` qualifies when it ends in `.pdf` or contains `pdf` in any case.
/// Qualifying links that cannot be resolved are passed over.
#[must_use]
pub fn find_pdf_link(html: &str, base: &Url) -> Option<Url> {
    let document = Html::parse_document(html);
    let Ok(anchors) = Selector::parse("a[href]") else {
        return None;
    };

    document
        .select(&anchors)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::trim)
        .filter(|href| is_pdf_href(href))
        .find_map(|href| base.join(href).ok())
}

fn is_pdf_href(href: &str) -> bool {
    href.ends_with(".pdf") || href.to_ascii_lowercase().contains("pdf")
}
