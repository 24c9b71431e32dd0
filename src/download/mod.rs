//! PDF downloads streamed to disk.
//!
//! This module downloads one candidate URL per publication, rejecting
//! anything that is not a PDF before a file is created.
//!
//! # Features
//!
//! - Streaming downloads written in fixed-size chunks
//! - Content-type validation (`application/pdf` or a `.pdf` URL)
//! - Skip without a request when the destination already exists
//! - Byte progress against the declared content length
//! - Structured error types with full context
//!
//! # Example
//!
//! ```no_run
//! use scholar_papers_core::download::{PdfDownloader, DEFAULT_DOWNLOAD_TIMEOUT};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = PdfDownloader::new(DEFAULT_DOWNLOAD_TIMEOUT)?;
//! let outcome = downloader
//!     .download("https://example.com/paper.pdf", Path::new("./papers/Paper.pdf"))
//!     .await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod error;
mod filename;
mod progress;

pub use client::{DownloadOutcome, PdfDownloader};
pub use constants::{DEFAULT_DOWNLOAD_TIMEOUT, DOWNLOAD_CHUNK_SIZE};
pub use error::DownloadError;
pub use filename::{MAX_TITLE_CHARS, PDF_EXTENSION, destination_for, sanitize_title};
