//! Alternate launchers that manage Minecraft on their own.

use minegate_multimc::MultiMcClient;
use minegate_protocol::{GameId, GameTime};

use crate::error::PluginError;

/// An alternate launcher for some of the tracked games.
///
/// It reports its own running state and play time; the plugin does not
/// track sessions it runs.
pub trait SecondaryManager: Send {
    /// Whether this manager launches `game`.
    fn serves(&self, game: GameId) -> bool;

    fn launch(&mut self) -> Result<(), PluginError>;

    fn is_running(&mut self) -> bool;

    /// Play time recorded by the manager itself.
    fn get_time(&self) -> GameTime;
}

impl SecondaryManager for MultiMcClient {
    fn serves(&self, game: GameId) -> bool {
        game == GameId::Minecraft
    }

    fn launch(&mut self) -> Result<(), PluginError> {
        MultiMcClient::launch(self).map_err(PluginError::from)
    }

    fn is_running(&mut self) -> bool {
        MultiMcClient::is_running(self)
    }

    fn get_time(&self) -> GameTime {
        MultiMcClient::get_time(self)
    }
}
