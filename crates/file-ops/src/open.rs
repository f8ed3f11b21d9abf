//! Spawning the platform opener and shell commands.

use std::path::Path;
use std::process::{Child, Command};

/// Opens a file, executable or bundle the way the desktop would.
///
/// Windows runs the path directly, macOS goes through `open`, everything
/// else through `xdg-open`.
pub fn open_path(path: &Path) -> std::io::Result<Child> {
    tracing::info!(path = %path.display(), "opening");

    #[cfg(target_os = "windows")]
    let child = Command::new(path).spawn();

    #[cfg(target_os = "macos")]
    let child = Command::new("open").arg(path).spawn();

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let child = Command::new("xdg-open").arg(path).spawn();

    child
}

/// Runs a command line through the system shell.
pub fn run_command(cmd: &str) -> std::io::Result<Child> {
    tracing::info!(cmd, "running");

    #[cfg(target_os = "windows")]
    let child = Command::new("cmd").args(["/C", cmd]).spawn();

    #[cfg(not(target_os = "windows"))]
    let child = Command::new("sh").args(["-c", cmd]).spawn();

    child
}
