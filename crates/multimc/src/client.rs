use std::path::{Path, PathBuf};
use std::process::{Child, Command};

use minegate_protocol::{GameId, GameTime, Platform};

use crate::MultiMcError;
use crate::instance;

/// A MultiMC installation chosen by the user.
#[derive(Debug)]
pub struct MultiMcClient {
    path: PathBuf,
    folder: PathBuf,
    instances_path: PathBuf,
    launch_target: PathBuf,
    process: Option<Child>,
}

impl MultiMcClient {
    /// Validates `path` and derives the MultiMC folders for this platform.
    pub fn new(path: &str) -> Result<Self, MultiMcError> {
        Self::with_platform(path, Platform::current())
    }

    /// Same as [`MultiMcClient::new`] with an explicit platform layout.
    pub fn with_platform(path: &str, platform: Platform) -> Result<Self, MultiMcError> {
        let expanded = minegate_file_ops::expand_path(path);
        let path = if expanded.is_absolute() {
            expanded
        } else {
            std::env::current_dir()?.join(expanded)
        };

        if !is_executable(&path) {
            return Err(MultiMcError::PathNotExecutable(path));
        }

        let folder = if platform.is_windows() {
            path.parent().map(Path::to_path_buf).unwrap_or_else(|| path.clone())
        } else {
            path.clone()
        };
        let instances_path = if platform.is_windows() {
            folder.join("instances")
        } else {
            folder.join("Contents").join("MacOS").join("instances")
        };
        // The bundle's own binary, so the child lives as long as MultiMC does.
        let launch_target = if platform.is_windows() {
            path.clone()
        } else {
            folder.join("Contents").join("MacOS").join("MultiMC")
        };

        tracing::debug!(
            path = %path.display(),
            instances = %instances_path.display(),
            "MultiMC configured"
        );

        Ok(Self {
            path,
            folder,
            instances_path,
            launch_target,
            process: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn instances_path(&self) -> &Path {
        &self.instances_path
    }

    /// The executable spawned by [`MultiMcClient::launch`].
    pub fn launch_target(&self) -> &Path {
        &self.launch_target
    }

    /// Starts MultiMC and remembers the child for [`MultiMcClient::is_running`].
    pub fn launch(&mut self) -> Result<(), MultiMcError> {
        let child = Command::new(&self.launch_target)
            .current_dir(&self.folder)
            .spawn()?;
        tracing::info!(
            pid = child.id(),
            target = %self.launch_target.display(),
            "MultiMC launched"
        );
        self.process = Some(child);
        Ok(())
    }

    /// Returns `true` while the launched child has not exited.
    ///
    /// The child is forgotten once it has exited.
    pub fn is_running(&mut self) -> bool {
        let Some(child) = self.process.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                tracing::debug!(%status, "MultiMC exited");
                self.process = None;
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to poll MultiMC");
                self.process = None;
                false
            }
        }
    }

    /// Play time summed across all instances, in minutes.
    pub fn get_time(&self) -> GameTime {
        let stats = instance::aggregate(&self.instances_path);
        let time = GameTime {
            game_id: GameId::Minecraft,
            time_played: stats.total_time_played / 60,
            last_played_time: stats.last_launch_ms.map(|ms| ms / 1000),
        };
        tracing::debug!(minutes = time.time_played, "MultiMC play time");
        time
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path).is_ok_and(|m| m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.exists()
}
