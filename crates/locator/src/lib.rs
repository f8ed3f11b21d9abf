//! Launcher install detection.
//!
//! A [`Locator`] finds where a game's vendor launcher is installed and plans
//! how to uninstall it. The strategy is picked once per process with
//! [`platform_locator`]:
//!
//! - **Windows**: registry probing under `Mojang\InstalledProducts`, across
//!   both registry roots and the native/WOW6432Node views.
//! - **macOS**: fixed application bundle paths.
//! - **Other**: nothing is ever installed.
//!
//! Every missing key, value or file is a plain "not found".

mod macos;
mod registry;
mod windows;

use std::path::PathBuf;

use minegate_protocol::{GameId, Platform};

pub use macos::MacLocator;
pub use registry::{RegRoot, RegistryView};
#[cfg(windows)]
pub use registry::WinRegistry;
pub use windows::WindowsLocator;

/// What it takes to remove a launcher from this machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UninstallPlan {
    /// Run the uninstall command recorded by the installer.
    Command(String),
    /// Move the launcher bundle/folder to the trash.
    Trash(PathBuf),
    /// The launcher is not installed or left no uninstall record.
    NotFound,
}

/// Platform strategy for locating and removing launchers.
pub trait Locator: Send + Sync {
    /// Returns the launcher executable, or its containing folder when
    /// `folder` is `true`.
    fn find_launcher_path(&self, game: GameId, folder: bool) -> Option<PathBuf>;

    /// Plans the uninstall of a game's launcher.
    fn uninstall_plan(&self, game: GameId) -> UninstallPlan;
}

/// Locator for platforms where no launcher can be installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLocator;

impl Locator for NullLocator {
    fn find_launcher_path(&self, _game: GameId, _folder: bool) -> Option<PathBuf> {
        None
    }

    fn uninstall_plan(&self, _game: GameId) -> UninstallPlan {
        UninstallPlan::NotFound
    }
}

/// Returns the locator for the platform this binary runs on.
pub fn platform_locator() -> Box<dyn Locator> {
    match Platform::current() {
        #[cfg(windows)]
        Platform::Windows => Box::new(WindowsLocator::new(WinRegistry)),
        Platform::MacOs => Box::new(MacLocator::new()),
        _ => Box::new(NullLocator),
    }
}
