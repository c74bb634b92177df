//! HTTP client wrapper for downloading files.
//!
//! This module provides the `HttpClient` struct which handles streaming
//! downloads with proper timeout configuration and error handling.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};

use super::constants::CONNECT_TIMEOUT_SECS;
use super::error::DownloadError;

/// HTTP client for downloading files with streaming support.
///
/// The client is created once per dispatch and shared by all download
/// tasks, taking advantage of connection pooling. The configured timeout
/// bounds each individual request end to end (connect through last body
/// byte); it does not bound the batch as a whole.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client whose requests are capped at `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Request`] if the underlying client cannot
    /// be constructed (e.g. no TLS backend available).
    pub fn with_timeout(timeout: Duration) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(timeout)
            .build()
            .map_err(|e| DownloadError::request("<client setup>", e))?;
        Ok(Self { client })
    }

    /// Downloads `url` into `dest_path`, truncating any existing file.
    ///
    /// Steps run in order and stop at the first failure: create-or-truncate
    /// the file, send the GET request, stream the body to disk. The file
    /// handle and response body are released on every exit path.
    ///
    /// # Errors
    ///
    /// - [`DownloadError::Io`] if the file cannot be created or written
    /// - [`DownloadError::Request`] on transport errors or non-2xx status
    /// - [`DownloadError::Timeout`] if the request exceeds the configured cap
    ///
    /// # Returns
    ///
    /// The number of body bytes written on success.
    #[instrument(skip(self, dest_path), fields(url = %url))]
    pub async fn fetch_to_path(&self, url: &str, dest_path: &Path) -> Result<u64, DownloadError> {
        debug!("starting download");

        let mut file = File::create(dest_path)
            .await
            .map_err(|e| DownloadError::io(dest_path, e))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::request(url, e))?
            .error_for_status()
            .map_err(|e| DownloadError::request(url, e))?;

        let bytes_written = stream_to_file(&mut file, response, url, dest_path).await?;

        debug!(bytes = bytes_written, "download complete");
        Ok(bytes_written)
    }
}

/// Streams the response body into the file through a buffered writer.
///
/// Memory stays bounded by the chunk size regardless of file length.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    dest_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::request(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(dest_path, e))?;

        bytes_written += chunk.len() as u64;
    }

    // Ensure all data is flushed to disk
    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(dest_path, e))?;

    Ok(bytes_written)
}
