//! Shell and filesystem helpers.
//!
//! Thin wrappers around the OS: opening files with the platform opener,
//! running uninstall commands, downloading installers to the temp dir,
//! moving bundles to the trash and summing folder sizes.

mod download;
mod error;
mod open;
mod paths;
mod size;
mod trash;

pub use download::{download, download_target};
pub use error::FileOpsError;
pub use open::{open_path, run_command};
pub use paths::expand_path;
pub use size::{dir_size, size_at_path};
pub use trash::{move_to_trash, trash_dir};

/// Returns the user's home directory.
fn home_dir() -> std::path::PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::path::PathBuf::from("/tmp"))
}
