//! Streaming PDF downloader.
//!
//! This module provides the `PdfDownloader` struct which validates the
//! response before anything touches disk, then streams the body to the
//! destination in fixed-size chunks.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use indicatif::ProgressBar;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use super::constants::DOWNLOAD_CHUNK_SIZE;
use super::error::DownloadError;
use super::progress::download_bar;
use crate::http::{self, TimeoutPolicy};

/// What the downloader did with a destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The body was written to `path`.
    Saved {
        /// Destination file.
        path: PathBuf,
        /// Bytes written.
        bytes: u64,
    },
    /// `path` already existed; no request was made.
    AlreadyPresent {
        /// Destination file.
        path: PathBuf,
    },
}

/// HTTP client for downloading PDFs with streaming support.
///
/// Created once per run and reused for every publication, taking advantage
/// of connection pooling.
#[derive(Debug, Clone)]
pub struct PdfDownloader {
    client: Client,
    show_progress: bool,
}

impl PdfDownloader {
    /// Creates a downloader whose socket reads must make progress within
    /// `read_timeout`. Progress bars are off until
    /// [`with_progress`](Self::with_progress) enables them.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Client`] when the HTTP client cannot be built.
    pub fn new(read_timeout: Duration) -> Result<Self, DownloadError> {
        let client = http::build_client(TimeoutPolicy::PerRead(read_timeout))
            .map_err(|source| DownloadError::Client { source })?;
        Ok(Self {
            client,
            show_progress: false,
        })
    }

    /// Enables or disables the terminal progress bar.
    #[must_use]
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    /// Downloads `url` to `destination`.
    ///
    /// Skips without any request when `destination` exists. The response is
    /// accepted only with status 200 and either a `application/pdf`
    /// content type or a URL ending in `.pdf`; rejected responses write
    /// nothing. A failure while streaming leaves the partial file in place.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is invalid
    /// - The request fails (network error, timeout)
    /// - The response status is not 200, or the body is not a PDF
    /// - Writing to disk fails
    #[must_use = "download outcome tells whether a file was written"]
    #[instrument(skip(self, destination), fields(url = %url, path = %destination.display()))]
    pub async fn download(
        &self,
        url: &str,
        destination: &Path,
    ) -> Result<DownloadOutcome, DownloadError> {
        if destination.exists() {
            debug!("destination exists, skipping request");
            return Ok(DownloadOutcome::AlreadyPresent {
                path: destination.to_path_buf(),
            });
        }

        let parsed_url = Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;

        let response = self
            .client
            .get(parsed_url)
            .send()
            .await
            .map_err(|e| DownloadError::from_request(url, e))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if status != StatusCode::OK {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }
        if !is_acceptable_pdf(url, &content_type) {
            return Err(DownloadError::not_pdf(url, content_type));
        }

        let content_length = response.content_length();
        let label = destination
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let bar = download_bar(self.show_progress, content_length, &label);

        let mut file = File::create(destination)
            .await
            .map_err(|e| DownloadError::io(destination, e))?;

        let stream_result = stream_to_file(&mut file, response, url, destination, &bar).await;
        bar.finish_and_clear();
        let bytes = stream_result?;

        info!(
            path = %destination.display(),
            bytes,
            expected = ?content_length,
            "download complete"
        );

        Ok(DownloadOutcome::Saved {
            path: destination.to_path_buf(),
            bytes,
        })
    }
}

/// Accept rule: declared PDF, or a URL that names a `.pdf` file.
fn is_acceptable_pdf(url: &str, content_type: &str) -> bool {
    content_type.contains("application/pdf") || url.ends_with(".pdf")
}

/// Streams response body to file in [`DOWNLOAD_CHUNK_SIZE`] pieces,
/// returning bytes written.
///
/// Buffered bytes are flushed even when the stream fails, so an interrupted
/// download leaves everything received so far on disk.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
    bar: &ProgressBar,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let streamed = copy_chunks(&mut writer, response, url, file_path, bar).await;
    let flushed = writer.flush().await;

    let bytes_written = streamed?;
    flushed.map_err(|e| DownloadError::io(file_path, e))?;
    Ok(bytes_written)
}

async fn copy_chunks(
    writer: &mut BufWriter<&mut File>,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
    bar: &ProgressBar,
) -> Result<u64, DownloadError> {
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::from_request(url, e))?;

        for piece in chunk.chunks(DOWNLOAD_CHUNK_SIZE) {
            writer
                .write_all(piece)
                .await
                .map_err(|e| DownloadError::io(file_path, e))?;
            bytes_written += piece.len() as u64;
            bar.inc(piece.len() as u64);
        }
    }

    Ok(bytes_written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::download::constants::DEFAULT_DOWNLOAD_TIMEOUT;
    use crate::test_support::socket_guard::{
        should_skip_socket_bound_test, start_mock_server_or_skip,
    };
    use tempfile::TempDir;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn downloader() -> PdfDownloader {
        PdfDownloader::new(DEFAULT_DOWNLOAD_TIMEOUT).unwrap()
    }

    /// Answers one request with a PDF that declares `declared` bytes but
    /// closes the connection after sending `sent`.
    async fn serve_cut_off_pdf(declared: usize, sent: usize) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 2048];
            let _ = socket.read(&mut request).await;
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/pdf\r\nContent-Length: {declared}\r\n\r\n"
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(&vec![b'%'; sent]).await.unwrap();
            socket.flush().await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}/cut-off.pdf")
    }

    #[test]
    fn test_is_acceptable_pdf_rules() {
        assert!(is_acceptable_pdf("https://x/y", "application/pdf"));
        assert!(is_acceptable_pdf("https://x/y", "application/pdf; charset=binary"));
        assert!(is_acceptable_pdf("https://x/y.pdf", "application/octet-stream"));
        assert!(is_acceptable_pdf("https://x/y.pdf", ""));
        assert!(!is_acceptable_pdf("https://x/y", "text/html"));
        assert!(!is_acceptable_pdf("https://x/y.PDF", "text/html"));
    }

    #[tokio::test]
    async fn test_download_pdf_content_type_success() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();
        let body = vec![b'%'; 5000];

        Mock::given(method("GET"))
            .and(path("/get/42"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "application/pdf")
                    .set_body_bytes(body.clone()),
            )
            .mount(&mock_server)
            .await;

        let destination = temp_dir.path().join("Paper.pdf");
        let url = format!("{}/get/42", mock_server.uri());
        let outcome = downloader().download(&url, &destination).await.unwrap();

        assert_eq!(
            outcome,
            DownloadOutcome::Saved {
                path: destination.clone(),
                bytes: 5000
            }
        );
        assert_eq!(std::fs::read(&destination).unwrap(), body);
    }

    #[tokio::test]
    async fn test_download_pdf_url_suffix_accepts_generic_content_type() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/files/paper.pdf"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "application/octet-stream")
                    .set_body_bytes(b"%PDF-1.7".to_vec()),
            )
            .mount(&mock_server)
            .await;

        let destination = temp_dir.path().join("Suffix.pdf");
        let url = format!("{}/files/paper.pdf", mock_server.uri());
        let outcome = downloader().download(&url, &destination).await;
        assert!(matches!(outcome, Ok(DownloadOutcome::Saved { bytes: 8, .. })));
    }

    #[tokio::test]
    async fn test_download_html_response_fails_without_writing() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/landing"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("<html>Sign in</html>", "text/html"),
            )
            .mount(&mock_server)
            .await;

        let destination = temp_dir.path().join("Html.pdf");
        let url = format!("{}/landing", mock_server.uri());
        let result = downloader().download(&url, &destination).await;

        match result {
            Err(DownloadError::NotPdf { content_type, .. }) => {
                assert_eq!(content_type, "text/html");
            }
            other => panic!("Expected NotPdf error, got: {other:?}"),
        }
        assert!(!destination.exists(), "rejected response must not create a file");
    }

    #[tokio::test]
    async fn test_download_cut_off_body_keeps_partial_file() {
        if should_skip_socket_bound_test() {
            return;
        }
        let temp_dir = TempDir::new().unwrap();
        let url = serve_cut_off_pdf(5000, 3000).await;
        let destination = temp_dir.path().join("Partial.pdf");

        let result = downloader().download(&url, &destination).await;

        assert!(result.is_err(), "truncated body must fail, got: {result:?}");
        let written = std::fs::metadata(&destination).unwrap().len();
        assert!(written > 0, "received bytes must stay on disk");
        assert!(written <= 3000);
    }

    #[tokio::test]
    async fn test_download_non_200_fails_without_writing() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/missing.pdf"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let destination = temp_dir.path().join("Missing.pdf");
        let url = format!("{}/missing.pdf", mock_server.uri());
        let result = downloader().download(&url, &destination).await;

        assert!(matches!(
            result,
            Err(DownloadError::HttpStatus { status: 404, .. })
        ));
        assert!(!destination.exists());
    }

    #[tokio::test]
    async fn test_download_existing_destination_is_skipped_without_request() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"new".to_vec()))
            .expect(0)
            .mount(&mock_server)
            .await;

        let destination = temp_dir.path().join("Existing.pdf");
        std::fs::write(&destination, b"old").unwrap();

        let url = format!("{}/paper.pdf", mock_server.uri());
        let outcome = downloader().download(&url, &destination).await.unwrap();

        assert!(matches!(outcome, DownloadOutcome::AlreadyPresent { .. }));
        assert_eq!(std::fs::read(&destination).unwrap(), b"old");
    }

    #[tokio::test]
    async fn test_download_invalid_url() {
        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("Bad.pdf");
        let result = downloader().download("not-a-valid-url", &destination).await;
        assert!(matches!(result, Err(DownloadError::InvalidUrl { .. })));
        assert!(!destination.exists());
    }

    #[tokio::test]
    async fn test_download_missing_directory_is_io_error() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/ok.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF".to_vec()))
            .mount(&mock_server)
            .await;

        let destination = temp_dir.path().join("no-such-dir").join("Paper.pdf");
        let url = format!("{}/ok.pdf", mock_server.uri());
        let result = downloader().download(&url, &destination).await;
        assert!(matches!(result, Err(DownloadError::Io { .. })));
    }
}
