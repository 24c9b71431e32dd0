//! Scholar Papers Core Library
//!
//! This library provides the pipeline behind the `scholar-papers` tool, which
//! fetches an author's publication list from an academic profile, ranks it by
//! citation count, and downloads the PDFs of the most-cited entries.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`profile`] - Author identifier extraction from profile URLs
//! - [`scholar`] - Publication listing from the metadata provider
//! - [`ranker`] - Citation-count ranking and truncation
//! - [`discover`] - PDF link discovery on publication landing pages
//! - [`download`] - Streaming PDF downloads with content-type validation
//! - [`pipeline`] - Orchestration of the above with per-item failure handling

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod discover;
pub mod download;
mod http;
pub mod pipeline;
pub mod profile;
pub mod publication;
pub mod ranker;
pub mod scholar;
#[cfg(test)]
pub(crate) mod test_support;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use discover::{LinkDiscoverer, PageFetchError, find_pdf_link};
pub use download::{
    DOWNLOAD_CHUNK_SIZE, DownloadError, DownloadOutcome, PdfDownloader, sanitize_title,
};
pub use pipeline::{ItemError, Orchestrator, PipelineSettings, RunError};
pub use profile::{AuthorId, ProfileError, resolve_author_id};
pub use publication::{DownloadResult, DownloadStatus, Publication, RunSummary};
pub use ranker::{DEFAULT_LIMIT, rank_by_citations};
pub use scholar::{MetadataFetchError, PublicationSource, ScholarSource};
