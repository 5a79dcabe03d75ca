//! Archive fetching
//!
//! Downloads an archive into a package directory unless a file of that name
//! is already there. Presence is the only check: a truncated or corrupt file
//! is kept as is and never re-fetched automatically.

use std::path::Path;

use tracing::{debug, info};
use url::Url;

use crate::core::workspace::PathContext;
use crate::error::DownloadError;

/// Something that can put the body of a URL into a local file
#[allow(async_fn_in_trait)]
pub trait Downloader {
    /// Download `url` into `dest`, replacing it if present
    async fn download(&self, url: &Url, dest: &Path) -> Result<(), DownloadError>;
}

/// What [`fetch_if_absent`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The file already existed, nothing was downloaded
    Present,
    /// The file was downloaded
    Downloaded,
}

/// Download `url` to `ctx/local_name` if that file does not exist yet
pub async fn fetch_if_absent<D: Downloader>(
    downloader: &D,
    ctx: &PathContext,
    local_name: &str,
    url: &Url,
) -> Result<FetchOutcome, DownloadError> {
    let dest = ctx.join(local_name);

    if dest.exists() {
        debug!("{} already present, skipping download", dest.display());
        return Ok(FetchOutcome::Present);
    }

    info!("Downloading {url}");
    downloader.download(url, &dest).await?;
    Ok(FetchOutcome::Downloaded)
}
