//! Moving launcher bundles to the user's trash.
//!
//! Only macOS uninstalls go through the trash, so the Finder layout is the
//! only one supported.

use std::path::{Path, PathBuf};

use crate::FileOpsError;

/// Returns the user's Finder trash, `~/.Trash`.
pub fn trash_dir() -> PathBuf {
    crate::home_dir().join(".Trash")
}

/// Moves `path` into the trash folder and returns its new location.
pub fn move_to_trash(path: &Path) -> Result<PathBuf, FileOpsError> {
    move_to_trash_in(path, &trash_dir())
}

/// Inner implementation that accepts a trash folder for testability.
fn move_to_trash_in(path: &Path, trash: &Path) -> Result<PathBuf, FileOpsError> {
    if !path.exists() {
        return Err(FileOpsError::NotFound(path.to_path_buf()));
    }
    let name = path
        .file_name()
        .ok_or_else(|| FileOpsError::NotFound(path.to_path_buf()))?;

    std::fs::create_dir_all(trash)?;

    // Same naming scheme as Finder: "Name 2", "Name 3", ...
    let mut target = trash.join(name);
    let mut n = 2u32;
    while target.exists() {
        let stem = Path::new(name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let candidate = match Path::new(name).extension() {
            Some(ext) => format!("{stem} {n}.{}", ext.to_string_lossy()),
            None => format!("{stem} {n}"),
        };
        target = trash.join(candidate);
        n += 1;
    }

    std::fs::rename(path, &target)?;
    tracing::info!(from = %path.display(), to = %target.display(), "moved to trash");
    Ok(target)
}
