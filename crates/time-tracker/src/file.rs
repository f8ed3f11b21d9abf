use std::path::{Path, PathBuf};

use crate::TrackerError;

const FILE_NAME: &str = "time_cache.txt";
const BANNER: &str = "# DO NOT EDIT THIS FILE";

/// Local copy of the ledger snapshot, used when the host cache is empty.
#[derive(Debug, Clone)]
pub struct CacheFile {
    path: PathBuf,
}

impl CacheFile {
    /// Cache file inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot, or `None` when the file is missing or empty.
    pub fn read(&self) -> Option<String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read time cache file");
                return None;
            }
        };
        content
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
    }

    /// Writes the snapshot under the warning banner.
    pub fn write(&self, snapshot: &str) -> Result<(), TrackerError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, format!("{BANNER}\n{snapshot}\n"))?;
        tracing::debug!(path = %self.path.display(), "time cache file written");
        Ok(())
    }
}
