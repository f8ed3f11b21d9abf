use std::path::PathBuf;

use minegate_protocol::GameId;

use crate::{Locator, UninstallPlan};

/// Application bundle name of a game's launcher, if it ships on macOS.
fn bundle_name(game: GameId) -> Option<&'static str> {
    match game {
        GameId::Minecraft => Some("Minecraft.app"),
        GameId::MinecraftDungeons => None,
    }
}

/// Finds launcher bundles in the well-known application folders.
///
/// The bundle is both the launcher "executable" and its folder.
#[derive(Debug, Clone)]
pub struct MacLocator {
    app_dirs: Vec<PathBuf>,
}

impl MacLocator {
    /// Creates a locator probing `/Applications` then `~/Applications`.
    pub fn new() -> Self {
        let mut app_dirs = vec![PathBuf::from("/Applications")];
        if let Some(home) = std::env::var_os("HOME") {
            app_dirs.push(PathBuf::from(home).join("Applications"));
        }
        Self { app_dirs }
    }

    /// Creates a locator probing custom application folders.
    pub fn with_app_dirs(app_dirs: Vec<PathBuf>) -> Self {
        Self { app_dirs }
    }
}

impl Default for MacLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl Locator for MacLocator {
    fn find_launcher_path(&self, game: GameId, _folder: bool) -> Option<PathBuf> {
        let bundle = bundle_name(game)?;
        self.app_dirs
            .iter()
            .map(|dir| dir.join(bundle))
            .find(|path| path.exists())
    }

    fn uninstall_plan(&self, game: GameId) -> UninstallPlan {
        match self.find_launcher_path(game, true) {
            Some(path) => UninstallPlan::Trash(path),
            None => UninstallPlan::NotFound,
        }
    }
}
