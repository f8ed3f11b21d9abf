use std::path::Path;

use minegate_protocol::GameId;

use crate::table::ProcessEntry;

/// How a launcher process shows up in the process table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessSignature {
    /// Process name, compared case-insensitively.
    Name(&'static str),
    /// Trailing components of the executable path, so a bundle matches
    /// wherever it is installed.
    ExeSuffix(&'static str),
}

const MINECRAFT: &[ProcessSignature] = &[
    ProcessSignature::Name("minecraftlauncher.exe"),
    ProcessSignature::ExeSuffix("Minecraft.app/Contents/MacOS/launcher"),
];

const MINECRAFT_DUNGEONS: &[ProcessSignature] = &[
    ProcessSignature::Name("minecraftdungeonslauncher.exe"),
    ProcessSignature::Name("dungeons.exe"),
];

/// Returns the signatures identifying a game's launcher.
pub fn signatures(game: GameId) -> &'static [ProcessSignature] {
    match game {
        GameId::Minecraft => MINECRAFT,
        GameId::MinecraftDungeons => MINECRAFT_DUNGEONS,
    }
}

impl ProcessSignature {
    /// Returns `true` if the process entry matches this signature.
    pub fn matches(&self, entry: &ProcessEntry) -> bool {
        match self {
            ProcessSignature::Name(name) => entry.name.eq_ignore_ascii_case(name),
            ProcessSignature::ExeSuffix(suffix) => entry
                .exe
                .as_deref()
                .is_some_and(|exe| exe.ends_with(Path::new(suffix))),
        }
    }
}
