//! Seam between the plugin and the library application embedding it.

use minegate_protocol::LocalGame;

/// Services the embedding application provides to the plugin.
///
/// Every call is a fire-and-forget notification or a lookup in the host's
/// persistent cache; none of them can fail from the plugin's point of view.
pub trait Host: Send + Sync {
    /// Reports a changed local state of one game.
    fn update_local_game_status(&self, game: LocalGame);

    /// Stores credentials to be handed back to `authenticate` next session.
    fn store_credentials(&self, credentials: serde_json::Value);

    /// Reads a value from the persistent cache.
    fn persistent_cache_get(&self, key: &str) -> Option<String>;

    /// Writes a value into the persistent cache (not yet flushed).
    fn persistent_cache_set(&self, key: &str, value: String);

    /// Flushes the persistent cache.
    fn push_cache(&self);
}
