//! Host implementation for running the plugin without a library client.
//!
//! Status changes are logged. Credentials and the persistent cache are kept
//! as JSON files in the data directory:
//! - `credentials.json`
//! - `cache.json` (written on `push_cache`)

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use minegate_plugin::Host;
use minegate_protocol::LocalGame;

const CREDENTIALS_FILE: &str = "credentials.json";
const CACHE_FILE: &str = "cache.json";

pub struct StandaloneHost {
    dir: PathBuf,
    cache: Mutex<HashMap<String, String>>,
}

impl StandaloneHost {
    /// Opens the host state stored in `dir`.
    pub fn open(dir: &Path) -> anyhow::Result<Self> {
        std::fs::create_dir_all(dir)?;

        let cache_path = dir.join(CACHE_FILE);
        let cache = match std::fs::read_to_string(&cache_path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %cache_path.display(), error = %e, "ignoring corrupt cache");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };

        Ok(Self {
            dir: dir.to_path_buf(),
            cache: Mutex::new(cache),
        })
    }

    /// Credentials stored by a previous session.
    pub fn stored_credentials(&self) -> Option<serde_json::Value> {
        let content = std::fs::read_to_string(self.dir.join(CREDENTIALS_FILE)).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn write_json(&self, name: &str, value: &impl serde::Serialize) {
        let path = self.dir.join(name);
        let result = serde_json::to_string_pretty(value)
            .map_err(std::io::Error::other)
            .and_then(|content| std::fs::write(&path, content));
        if let Err(e) = result {
            tracing::error!(path = %path.display(), error = %e, "failed to write host state");
        }
    }
}

impl Host for StandaloneHost {
    fn update_local_game_status(&self, game: LocalGame) {
        tracing::info!(
            game = %game.game_id,
            state = ?game.local_game_state,
            flags = game.local_game_state.as_flags(),
            "local game status"
        );
    }

    fn store_credentials(&self, credentials: serde_json::Value) {
        self.write_json(CREDENTIALS_FILE, &credentials);
    }

    fn persistent_cache_get(&self, key: &str) -> Option<String> {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.get(key).cloned()
    }

    fn persistent_cache_set(&self, key: &str, value: String) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.insert(key.to_string(), value);
    }

    fn push_cache(&self) {
        let snapshot = self
            .cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        self.write_json(CACHE_FILE, &snapshot);
    }
}
