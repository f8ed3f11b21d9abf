//! Agent configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux/macOS: `~/.config/minegate/agent.toml`
//! - Windows: `%APPDATA%/minegate/agent.toml`

use std::path::PathBuf;
use std::time::Duration;

use minegate_plugin::PluginConfig;
use minegate_protocol::GameId;
use serde::{Deserialize, Serialize};

/// Agent configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Games answered to the configuration wizard as owned.
    #[serde(default = "default_owned")]
    pub owned: Vec<GameId>,

    /// MultiMC executable (or bundle on macOS), if used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multimc_path: Option<String>,

    /// Reconciliation tick period in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Minimum seconds between two process scans.
    #[serde(default = "default_scan_interval_secs")]
    pub scan_interval_secs: u64,

    /// Double-click window for launching MultiMC, in milliseconds.
    #[serde(default = "default_double_click_ms")]
    pub double_click_ms: u64,

    /// Where credentials and the play-time cache live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
}

fn default_owned() -> Vec<GameId> {
    vec![GameId::Minecraft]
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_scan_interval_secs() -> u64 {
    5
}

fn default_double_click_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            owned: default_owned(),
            multimc_path: None,
            tick_interval_ms: default_tick_interval_ms(),
            scan_interval_secs: default_scan_interval_secs(),
            double_click_ms: default_double_click_ms(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Loads configuration from disk, or creates a default if not found.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Saves the current configuration to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Resolved data directory, defaulting to the configuration directory.
    pub fn data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => minegate_file_ops::expand_path(dir),
            None => config_dir(),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Plugin settings derived from this configuration.
    pub fn plugin_config(&self) -> PluginConfig {
        PluginConfig {
            scan_interval: Duration::from_secs(self.scan_interval_secs),
            double_click_timeout: Duration::from_millis(self.double_click_ms),
            cache_dir: Some(self.data_dir()),
            ..PluginConfig::default()
        }
    }
}

fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata).join("minegate")
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home).join(".config").join("minegate")
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> PathBuf {
    config_dir().join("agent.toml")
}
