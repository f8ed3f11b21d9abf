//! Install folder size.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Sums the sizes of all regular files below `path`, skipping symlinks.
///
/// Unreadable entries are ignored.
pub fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .flatten()
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum()
}

/// Computes [`dir_size`] on the blocking pool.
///
/// Returns `None` when there is no path to measure.
pub async fn size_at_path(path: Option<PathBuf>) -> Option<u64> {
    let path = path?;
    let shown = path.display().to_string();
    match tokio::task::spawn_blocking(move || dir_size(&path)).await {
        Ok(size) => {
            tracing::debug!(path = %shown, size, "computed install size");
            Some(size)
        }
        Err(e) => {
            tracing::warn!(path = %shown, error = %e, "size walk failed");
            None
        }
    }
}
