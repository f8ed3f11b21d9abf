//! Launcher names, installer URLs and other fixed facts about the games.

use crate::platform::Platform;
use crate::types::GameId;

/// Installer for the Minecraft launcher on Windows.
pub const MINECRAFT_WIN_INSTALL_URL: &str =
    "https://launcher.mojang.com/download/MinecraftInstaller.msi";

/// Disk image for the Minecraft launcher on macOS.
pub const MINECRAFT_MAC_INSTALL_URL: &str = "https://launcher.mojang.com/download/Minecraft.dmg";

/// Installer for the Minecraft Dungeons launcher (Windows only).
pub const MINECRAFT_DUNGEONS_INSTALL_URL: &str =
    "https://launcher.mojang.com/download/MinecraftDungeonsInstaller.msi";

/// Key of the play-time ledger in the host's persistent cache.
pub const TIME_CACHE_KEY: &str = "time_cache";

/// Display title of a game.
pub fn game_name(game: GameId) -> &'static str {
    match game {
        GameId::Minecraft => "Minecraft",
        GameId::MinecraftDungeons => "Minecraft Dungeons",
    }
}

/// Name the vendor launcher registers itself under.
pub fn launcher_name(game: GameId) -> &'static str {
    match game {
        GameId::Minecraft => "Minecraft Launcher",
        GameId::MinecraftDungeons => "Minecraft Dungeons Launcher",
    }
}

/// Returns the installer URL for a game on the given platform.
///
/// `None` when the game has no installer for that platform.
pub fn download_url(game: GameId, platform: Platform) -> Option<&'static str> {
    match (game, platform) {
        (GameId::Minecraft, Platform::Windows) => Some(MINECRAFT_WIN_INSTALL_URL),
        (GameId::Minecraft, Platform::MacOs) => Some(MINECRAFT_MAC_INSTALL_URL),
        (GameId::MinecraftDungeons, Platform::Windows) => Some(MINECRAFT_DUNGEONS_INSTALL_URL),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_urls_per_platform() {
        assert_eq!(
            download_url(GameId::Minecraft, Platform::MacOs),
            Some(MINECRAFT_MAC_INSTALL_URL)
        );
        assert_eq!(
            download_url(GameId::MinecraftDungeons, Platform::Windows),
            Some(MINECRAFT_DUNGEONS_INSTALL_URL)
        );
        assert_eq!(download_url(GameId::MinecraftDungeons, Platform::MacOs), None);
        assert_eq!(download_url(GameId::Minecraft, Platform::Other), None);
    }

    #[test]
    fn names() {
        assert_eq!(game_name(GameId::MinecraftDungeons), "Minecraft Dungeons");
        assert_eq!(launcher_name(GameId::Minecraft), "Minecraft Launcher");
    }
}
