use std::path::PathBuf;

use minegate_protocol::{GameId, launcher_name};

use crate::registry::{RegRoot, RegistryView};
use crate::{Locator, UninstallPlan};

/// Registry roots, current user first.
const ROOTS: [RegRoot; 2] = [RegRoot::CurrentUser, RegRoot::LocalMachine];

/// Native and 32-bit compatibility views of `SOFTWARE`.
const SOFTWARE_PREFIXES: [&str; 2] = ["SOFTWARE\\", "SOFTWARE\\WOW6432Node\\"];

const INSTALLED_PRODUCTS: &str = "Mojang\\InstalledProducts\\";
const UNINSTALL_LOCATION: &str = "Microsoft\\Windows\\CurrentVersion\\Uninstall";

const INSTALL_LOCATION_VALUE: &str = "InstallLocation";

/// Name of the registry value holding the launcher executable.
fn exe_value_name(game: GameId) -> &'static str {
    match game {
        GameId::Minecraft => "InstallExe",
        GameId::MinecraftDungeons => "InstallFile",
    }
}

/// Finds launchers through the Mojang installer's registry entries.
pub struct WindowsLocator<R> {
    registry: R,
}

impl<R: RegistryView> WindowsLocator<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Probes every root × prefix combination, returning the first
    /// `(install folder, executable)` pair whose executable exists.
    fn probe(&self, game: GameId) -> Option<(PathBuf, PathBuf)> {
        let product_key = format!("{INSTALLED_PRODUCTS}{}", launcher_name(game));

        for root in ROOTS {
            for prefix in SOFTWARE_PREFIXES {
                let key = format!("{prefix}{product_key}");
                let Some(location) =
                    self.registry
                        .string_value(root, &key, INSTALL_LOCATION_VALUE)
                else {
                    continue;
                };
                let Some(exe) = self
                    .registry
                    .string_value(root, &key, exe_value_name(game))
                else {
                    continue;
                };

                let folder = PathBuf::from(location);
                let exe_path = folder.join(exe);
                if exe_path.exists() {
                    tracing::debug!(%game, ?root, key = %key, "launcher found in registry");
                    return Some((folder, exe_path));
                }
                tracing::debug!(
                    %game,
                    path = %exe_path.display(),
                    "registry entry points to a missing executable"
                );
            }
        }
        None
    }

    /// Searches the uninstall registry for the launcher's uninstall command.
    fn find_uninstall_command(&self, game: GameId) -> Option<String> {
        let name = launcher_name(game);

        for root in ROOTS {
            for prefix in SOFTWARE_PREFIXES {
                let base = format!("{prefix}{UNINSTALL_LOCATION}");
                for subkey in self.registry.subkeys(root, &base) {
                    let path = format!("{base}\\{subkey}");
                    let display = self.registry.string_value(root, &path, "DisplayName");
                    if display.as_deref() != Some(name) {
                        continue;
                    }
                    if let Some(cmd) = self.registry.string_value(root, &path, "UninstallString") {
                        return Some(cmd);
                    }
                }
            }
        }
        None
    }
}

impl<R: RegistryView> Locator for WindowsLocator<R> {
    fn find_launcher_path(&self, game: GameId, folder: bool) -> Option<PathBuf> {
        let (dir, exe) = self.probe(game)?;
        Some(if folder { dir } else { exe })
    }

    fn uninstall_plan(&self, game: GameId) -> UninstallPlan {
        match self.find_uninstall_command(game) {
            Some(cmd) => UninstallPlan::Command(cmd),
            None => {
                tracing::warn!(%game, "no uninstall entry found");
                UninstallPlan::NotFound
            }
        }
    }
}
