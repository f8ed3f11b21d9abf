//! Installer download to the temp directory.

use std::path::PathBuf;

use crate::FileOpsError;

/// Returns where [`download`] stores a URL: the temp dir plus the last path
/// segment of the URL.
pub fn download_target(url: &str) -> Result<PathBuf, FileOpsError> {
    let name = url
        .split(['?', '#'])
        .next()
        .and_then(|path| path.rsplit('/').next())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| FileOpsError::InvalidUrl(url.to_string()))?;
    Ok(std::env::temp_dir().join(name))
}

/// Downloads `url` into the temp directory and returns the file path.
pub async fn download(url: &str) -> Result<PathBuf, FileOpsError> {
    let target = download_target(url)?;
    tracing::info!(url, target = %target.display(), "downloading");

    let response = reqwest::get(url)
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| FileOpsError::Http(e.to_string()))?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| FileOpsError::Http(e.to_string()))?;

    tokio::fs::write(&target, &bytes).await?;
    tracing::debug!(bytes = bytes.len(), "download complete");
    Ok(target)
}
