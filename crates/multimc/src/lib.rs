//! MultiMC adapter.
//!
//! MultiMC manages many Minecraft instances on its own. The integration
//! treats it as an alternate launcher for Minecraft: it can be started,
//! polled for "still running", and asked for the play time summed across
//! all of its instances.

mod client;
mod instance;

pub use client::MultiMcClient;
pub use instance::{InstanceStats, parse_instance_cfg};

/// Errors produced by the MultiMC adapter.
#[derive(Debug, thiserror::Error)]
pub enum MultiMcError {
    #[error("path is not executable: {0}")]
    PathNotExecutable(std::path::PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
