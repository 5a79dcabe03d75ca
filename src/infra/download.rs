//! Archive downloads
//!
//! Two [`Downloader`] implementations: [`WgetDownloader`] shells out to
//! `wget`, [`HttpDownloader`] streams the body with reqwest and reports
//! progress. Neither retries.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::StreamExt;
use sha2::{Digest, Sha256};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use url::Url;

use crate::config::defaults;
use crate::core::fetch::Downloader;
use crate::error::DownloadError;
use crate::infra::process;

/// Progress callback type for download progress reporting
pub type ProgressCallback = Box<dyn Fn(u64, u64) + Send + Sync>;

/// Size and digest of a completed download
#[derive(Debug)]
pub struct DownloadResult {
    /// Size in bytes
    pub size: u64,
    /// SHA256 checksum of the downloaded content
    pub checksum: String,
}

/// Downloads with `wget --quiet`
#[derive(Debug, Clone, Default)]
pub struct WgetDownloader;

impl WgetDownloader {
    fn args(url: &Url, dest: &Path) -> Vec<String> {
        vec![
            "--quiet".to_string(),
            "-O".to_string(),
            dest.display().to_string(),
            url.to_string(),
        ]
    }
}

impl Downloader for WgetDownloader {
    async fn download(&self, url: &Url, dest: &Path) -> Result<(), DownloadError> {
        let result = process::run_async(defaults::WGET, &Self::args(url, dest)).await;
        if let Err(source) = result {
            // wget -O leaves an empty or partial file behind on failure
            discard(dest).await;
            return Err(DownloadError::ToolFailed {
                url: url.to_string(),
                source,
            });
        }
        Ok(())
    }
}

/// Native HTTP downloader
pub struct HttpDownloader {
    /// HTTP client
    client: reqwest::Client,
    /// Progress reporting, called with (`bytes_downloaded`, `total_bytes`)
    progress: Option<ProgressCallback>,
}

impl std::fmt::Debug for HttpDownloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDownloader")
            .field("progress", &self.progress.is_some())
            .finish_non_exhaustive()
    }
}

impl HttpDownloader {
    /// Create a new downloader
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS))
                .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            progress: None,
        }
    }

    /// Report progress through `callback`
    #[must_use]
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Download `url` into `dest`
    ///
    /// The body is streamed into `<dest>.part` and renamed into place once
    /// complete, so a failed download never leaves a file at `dest`.
    pub async fn fetch(&self, url: &Url, dest: &Path) -> Result<DownloadResult, DownloadError> {
        let partial = partial_path(dest);
        let result = self.fetch_into(url, &partial).await;

        match result {
            Ok(size_and_checksum) => {
                tokio::fs::rename(&partial, dest)
                    .await
                    .map_err(|e| DownloadError::IoError {
                        path: dest.to_path_buf(),
                        error: e.to_string(),
                    })?;
                let (size, checksum) = size_and_checksum;
                debug!("{} ({size} bytes, sha256 {checksum})", dest.display());
                Ok(DownloadResult { size, checksum })
            }
            Err(e) => {
                discard(&partial).await;
                Err(e)
            }
        }
    }

    async fn fetch_into(&self, url: &Url, dest: &Path) -> Result<(u64, String), DownloadError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| DownloadError::NetworkError {
                url: url.to_string(),
                error: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(DownloadError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let total_size = response.content_length().unwrap_or(0);

        let mut file = File::create(dest)
            .await
            .map_err(|e| DownloadError::IoError {
                path: dest.to_path_buf(),
                error: e.to_string(),
            })?;

        let mut hasher = Sha256::new();
        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(|e| DownloadError::NetworkError {
                url: url.to_string(),
                error: e.to_string(),
            })?;

            file.write_all(&chunk)
                .await
                .map_err(|e| DownloadError::IoError {
                    path: dest.to_path_buf(),
                    error: e.to_string(),
                })?;

            hasher.update(&chunk);
            downloaded += chunk.len() as u64;

            if let Some(cb) = &self.progress {
                cb(downloaded, total_size);
            }
        }

        file.flush().await.map_err(|e| DownloadError::IoError {
            path: dest.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok((downloaded, hex::encode(hasher.finalize())))
    }
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self::new()
    }
}

impl Downloader for HttpDownloader {
    async fn download(&self, url: &Url, dest: &Path) -> Result<(), DownloadError> {
        self.fetch(url, dest).await.map(|_| ())
    }
}

/// Sibling path used while a download is in flight
fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}

/// Remove a leftover file; a file that is already gone is not an error
async fn remove_leftover(path: &Path) -> io::Result<()> {
    match tokio::fs::remove_file(path).await {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        result => result,
    }
}

/// Remove the remains of a failed download, warning if they stay behind
async fn discard(path: &Path) {
    if let Err(e) = remove_leftover(path).await {
        warn!("Could not remove incomplete download {}: {e}", path.display());
    }
}
