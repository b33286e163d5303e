//! CDN asset downloads.
//!
//! Assets are fetched sequentially and written through a temp file that is
//! renamed into place, so a partial download is never mistaken for a
//! complete file. The first failure removes its temp file and aborts the
//! remaining batch; completed files stay where they are.

use std::fs;
use std::path::Path;
use std::time::Duration;

/// Connect and read timeout per request.
const TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur while downloading assets.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Invalid download URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to download {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },
}

/// Build the HTTP client used for a download batch.
pub fn client() -> Result<reqwest::Client, DownloadError> {
    reqwest::Client::builder()
        .connect_timeout(TIMEOUT)
        .timeout(TIMEOUT)
        .build()
        .map_err(|e| DownloadError::Client(e.to_string()))
}

/// Download each URL into `folder`, sequentially.
pub async fn download_all(
    client: &reqwest::Client,
    urls: &[String],
    folder: &Path,
) -> Result<(), DownloadError> {
    for url in urls {
        download_one(client, url, folder).await?;
        tracing::debug!("Downloaded {}", url);
    }
    Ok(())
}

async fn download_one(
    client: &reqwest::Client,
    url: &str,
    folder: &Path,
) -> Result<(), DownloadError> {
    let filename = filename_for(url)?;
    let outfile = folder.join(filename);
    let tmpfile = folder.join(format!("{}.tmp", filename));

    if let Err(err) = fetch(client, url, &tmpfile).await {
        let _ = fs::remove_file(&tmpfile);
        return Err(err);
    }

    fs::rename(&tmpfile, &outfile).map_err(|e| DownloadError::Write {
        path: outfile.display().to_string(),
        message: e.to_string(),
    })
}

async fn fetch(client: &reqwest::Client, url: &str, tmpfile: &Path) -> Result<(), DownloadError> {
    let fetch_error = |message: String| DownloadError::Fetch {
        url: url.to_string(),
        message,
    };

    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| fetch_error(e.to_string()))?;

    let body = response
        .bytes()
        .await
        .map_err(|e| fetch_error(e.to_string()))?;

    fs::write(tmpfile, &body).map_err(|e| DownloadError::Write {
        path: tmpfile.display().to_string(),
        message: e.to_string(),
    })
}

/// The output file name for a URL: its last path segment, query stripped.
fn filename_for(url: &str) -> Result<&str, DownloadError> {
    let name = url
        .rsplit('/')
        .next()
        .unwrap_or("")
        .split('?')
        .next()
        .unwrap_or("");

    if name.is_empty() {
        return Err(DownloadError::InvalidUrl(url.to_string()));
    }
    Ok(name)
}
