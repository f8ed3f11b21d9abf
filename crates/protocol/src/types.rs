use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A game tracked by the integration.
///
/// The set is fixed: entries are never created at runtime, only selected as
/// owned through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameId {
    #[serde(rename = "mc")]
    Minecraft,
    #[serde(rename = "mcd")]
    MinecraftDungeons,
}

impl GameId {
    /// Returns every trackable game.
    pub fn all() -> &'static [GameId] {
        &[GameId::Minecraft, GameId::MinecraftDungeons]
    }

    /// Returns the short id used on the wire and in the time cache.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameId::Minecraft => "mc",
            GameId::MinecraftDungeons => "mcd",
        }
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognised game id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown game id: {0}")]
pub struct UnknownGameId(pub String);

impl FromStr for GameId {
    type Err = UnknownGameId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mc" => Ok(GameId::Minecraft),
            "mcd" => Ok(GameId::MinecraftDungeons),
            other => Err(UnknownGameId(other.to_string())),
        }
    }
}

/// Local installation state of a game as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LocalGameState {
    #[default]
    NotInstalled,
    Installed,
    InstalledAndRunning,
}

impl LocalGameState {
    const INSTALLED: u8 = 0b01;
    const RUNNING: u8 = 0b10;

    /// Returns the host flag encoding (`None = 0`, `Installed = 1`, `Running = 2`).
    pub fn as_flags(&self) -> u8 {
        match self {
            LocalGameState::NotInstalled => 0,
            LocalGameState::Installed => Self::INSTALLED,
            LocalGameState::InstalledAndRunning => Self::INSTALLED | Self::RUNNING,
        }
    }

    /// Returns `true` for `InstalledAndRunning`.
    pub fn is_running(&self) -> bool {
        matches!(self, LocalGameState::InstalledAndRunning)
    }
}

bitflags::bitflags! {
    /// Operating systems a game can run on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OsCompatibility: u8 {
        const WINDOWS = 0b0001;
        const MACOS = 0b0010;
        const LINUX = 0b0100;
    }
}

/// License under which a game is owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LicenseType {
    SinglePurchase,
    FreeToPlay,
    Unknown,
}

/// An owned game as reported to the host library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub game_id: GameId,
    pub game_title: String,
    pub license: LicenseType,
}

/// Local state of a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalGame {
    pub game_id: GameId,
    pub local_game_state: LocalGameState,
}

impl LocalGame {
    pub fn new(game_id: GameId, local_game_state: LocalGameState) -> Self {
        Self {
            game_id,
            local_game_state,
        }
    }
}

/// Play time for a game.
///
/// `last_played_time` is `None` when the game was never played, which is
/// distinct from `Some(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTime {
    pub game_id: GameId,
    /// Total minutes played.
    pub time_played: u64,
    /// Unix timestamp (seconds) of the last session, if any.
    pub last_played_time: Option<i64>,
}

impl GameTime {
    /// A record for a game that was never played.
    pub fn never_played(game_id: GameId) -> Self {
        Self {
            game_id,
            time_played: 0,
            last_played_time: None,
        }
    }
}

/// Successful authentication result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authentication {
    pub user_id: String,
    pub user_name: String,
}

/// Parameters of a web-session configuration step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextStep {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub start_uri: String,
    pub end_uri_regex: String,
}
