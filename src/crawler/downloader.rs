//! Image downloader
//!
//! Streams a single image to disk. A destination that already exists is
//! never requested again.

use crate::crawler::fetcher::describe_request_error;
use reqwest::{Client, Response};
use std::path::Path;
use thiserror::Error;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Errors that can occur while saving one image
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Result of a single image download
#[derive(Debug)]
pub enum DownloadOutcome {
    /// A new file was written
    Downloaded {
        /// Number of bytes written
        bytes: u64,
    },

    /// The destination already existed; no request was made
    Skipped,

    /// The image could not be saved
    Failed(DownloadError),
}

/// Downloads one image into `destination`
///
/// The body is streamed chunk by chunk. If the transfer fails after the
/// file was created, the partial file is removed, so a file on disk always
/// means a complete download. A file this call did not create is never
/// touched. This function never returns an error; failures are reported
/// as [`DownloadOutcome::Failed`].
pub async fn download_image(client: &Client, image_url: &str, destination: &Path) -> DownloadOutcome {
    if let Ok(true) = tokio::fs::try_exists(destination).await {
        tracing::debug!("Skipping {}: {} already exists", image_url, destination.display());
        return DownloadOutcome::Skipped;
    }

    match save_image(client, image_url, destination).await {
        Ok(bytes) => DownloadOutcome::Downloaded { bytes },
        Err(e) => DownloadOutcome::Failed(e),
    }
}

async fn save_image(client: &Client, image_url: &str, destination: &Path) -> Result<u64, DownloadError> {
    let mut response = client
        .get(image_url)
        .send()
        .await
        .map_err(|e| DownloadError::Request(describe_request_error(&e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::Status(status.as_u16()));
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(destination)
        .await
        .map_err(|source| write_error(destination, source))?;

    match stream_to_file(&mut response, &mut file, destination).await {
        Ok(written) => Ok(written),
        Err(e) => {
            drop(file);
            if let Err(remove_err) = tokio::fs::remove_file(destination).await {
                tracing::warn!(
                    "Could not remove partial file {}: {}",
                    destination.display(),
                    remove_err
                );
            }
            Err(e)
        }
    }
}

async fn stream_to_file(
    response: &mut Response,
    file: &mut File,
    destination: &Path,
) -> Result<u64, DownloadError> {
    let mut written: u64 = 0;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| DownloadError::Request(describe_request_error(&e)))?
    {
        file.write_all(&chunk)
            .await
            .map_err(|source| write_error(destination, source))?;
        written += chunk.len() as u64;
    }
    file.flush()
        .await
        .map_err(|source| write_error(destination, source))?;

    Ok(written)
}

fn write_error(destination: &Path, source: std::io::Error) -> DownloadError {
    DownloadError::Write {
        path: destination.display().to_string(),
        source,
    }
}
