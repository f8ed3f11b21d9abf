use std::path::PathBuf;
use std::time::Duration;

use minegate_process::DEFAULT_SCAN_INTERVAL;
use minegate_protocol::Platform;

/// Double-click window when an alternate launcher is configured.
pub const DEFAULT_DOUBLE_CLICK_TIMEOUT: Duration = Duration::from_secs(1);

/// Plugin tuning and environment.
#[derive(Debug, Clone)]
pub struct PluginConfig {
    /// Minimum spacing between two background process scans.
    pub scan_interval: Duration,
    /// Window for a second launch click to pick MultiMC.
    pub double_click_timeout: Duration,
    /// Directory of the local time cache file; `None` disables it.
    pub cache_dir: Option<PathBuf>,
    /// Wizard page shown by the configuration step.
    pub wizard_page: PathBuf,
    pub platform: Platform,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            scan_interval: DEFAULT_SCAN_INTERVAL,
            double_click_timeout: DEFAULT_DOUBLE_CLICK_TIMEOUT,
            cache_dir: None,
            wizard_page: PathBuf::from("page").join("index.html"),
            platform: Platform::current(),
        }
    }
}
