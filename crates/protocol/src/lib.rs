//! Shared types for the Minegate integration.
//!
//! Everything the host sees (game ids, local states, play time records,
//! authentication steps) plus the constants that describe the launchers.

pub mod constants;
pub mod platform;
pub mod types;

// Re-export primary types for convenience.
pub use constants::{download_url, game_name, launcher_name};
pub use platform::Platform;
pub use types::{
    Authentication, Game, GameId, GameTime, LicenseType, LocalGame, LocalGameState, NextStep,
    OsCompatibility, UnknownGameId,
};
