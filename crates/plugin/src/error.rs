use std::path::PathBuf;

/// Errors surfaced by the plugin.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("MultiMC path is not executable: {0}")]
    PathNotExecutable(PathBuf),

    #[error("play time: {0}")]
    Tracker(#[from] minegate_time_tracker::TrackerError),

    #[error("file operation: {0}")]
    FileOps(#[from] minegate_file_ops::FileOpsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<minegate_multimc::MultiMcError> for PluginError {
    fn from(e: minegate_multimc::MultiMcError) -> Self {
        match e {
            minegate_multimc::MultiMcError::PathNotExecutable(path) => {
                PluginError::PathNotExecutable(path)
            }
            minegate_multimc::MultiMcError::Io(e) => PluginError::Io(e),
        }
    }
}
