//! The Minecraft plugin and its lifecycle surface.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use minegate_file_ops::{download, move_to_trash, open_path, run_command, size_at_path};
use minegate_locator::{Locator, UninstallPlan, platform_locator};
use minegate_multimc::MultiMcClient;
use minegate_process::{ProcessTable, ProcessWatcher, ScanScheduler, SysinfoTable};
use minegate_protocol::constants::TIME_CACHE_KEY;
use minegate_protocol::{
    Authentication, Game, GameId, GameTime, LicenseType, LocalGame, NextStep, OsCompatibility,
    download_url, game_name,
};
use minegate_time_tracker::{CacheFile, TimeTracker, TrackerError, compare};
use tracing::{debug, info, warn};

use crate::config::PluginConfig;
use crate::credentials::Credentials;
use crate::error::PluginError;
use crate::host::Host;
use crate::launch::{LaunchAction, LaunchDebouncer};
use crate::reconcile::{Probe, Reconciler, Transition, classify};
use crate::secondary::SecondaryManager;

const USER_ID: &str = "mojang_user";
const USER_NAME: &str = "Mojang User";

const WIZARD_TITLE: &str = "Select Owned Games";
const WIZARD_SIZE: u32 = 720;
const WIZARD_END_URI_REGEX: &str = ".*finished.*";
/// Wizard error code shown when the MultiMC path cannot be used.
const INVALID_PATH_ERROR: &str = "invalid_path";

/// Folder sizes per game, computed ahead of `get_local_size` calls.
pub type SizeContext = HashMap<GameId, Option<u64>>;

/// Result of an authentication step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(Authentication),
    /// The host must show the configuration wizard.
    NextStep(NextStep),
}

/// Launcher paths looked up during one reconciliation pass.
struct PathMemo<'a> {
    locator: &'a dyn Locator,
    paths: HashMap<GameId, Option<PathBuf>>,
}

impl<'a> PathMemo<'a> {
    fn new(locator: &'a dyn Locator) -> Self {
        Self {
            locator,
            paths: HashMap::new(),
        }
    }

    fn get(&mut self, game: GameId) -> Option<&PathBuf> {
        let locator = self.locator;
        let path: &Option<PathBuf> = self
            .paths
            .entry(game)
            .or_insert_with(|| locator.find_launcher_path(game, false));
        path.as_ref()
    }
}

/// Library plugin for Minecraft and Minecraft Dungeons.
pub struct MinecraftPlugin {
    host: Arc<dyn Host>,
    config: PluginConfig,
    locator: Box<dyn Locator>,
    watcher: ProcessWatcher,
    scheduler: ScanScheduler,
    secondary: Option<Box<dyn SecondaryManager>>,
    tracker: TimeTracker,
    cache_file: Option<CacheFile>,
    reconciler: Reconciler,
    launcher: LaunchDebouncer,
    owned: Vec<GameId>,
}

impl MinecraftPlugin {
    /// Creates a plugin using this platform's locator and the live process
    /// table.
    pub fn new(host: Arc<dyn Host>, config: PluginConfig) -> Self {
        Self::with_parts(
            host,
            config,
            platform_locator(),
            Arc::new(SysinfoTable::new()),
        )
    }

    /// Creates a plugin with an explicit locator and process table.
    pub fn with_parts(
        host: Arc<dyn Host>,
        config: PluginConfig,
        locator: Box<dyn Locator>,
        table: Arc<dyn ProcessTable>,
    ) -> Self {
        let cache_file = config.cache_dir.as_deref().map(CacheFile::in_dir);
        Self {
            host,
            scheduler: ScanScheduler::new(config.scan_interval),
            config,
            locator,
            watcher: ProcessWatcher::new(table),
            secondary: None,
            tracker: TimeTracker::new(),
            cache_file,
            reconciler: Reconciler::new(),
            launcher: LaunchDebouncer::new(),
            owned: Vec::new(),
        }
    }

    /// Replaces the alternate launcher.
    pub fn set_secondary_manager(&mut self, secondary: Option<Box<dyn SecondaryManager>>) {
        self.secondary = secondary;
    }

    pub fn owned(&self) -> &[GameId] {
        &self.owned
    }

    pub fn tracker(&self) -> &TimeTracker {
        &self.tracker
    }

    // -----------------------------------------------------------------------
    // Authentication
    // -----------------------------------------------------------------------

    /// Authenticates from stored credentials, or asks for the wizard.
    pub fn authenticate(&mut self, stored: Option<&serde_json::Value>) -> AuthOutcome {
        let Some(value) = stored else {
            debug!("no stored credentials, starting wizard");
            return AuthOutcome::NextStep(self.wizard(None));
        };

        let credentials = match Credentials::from_value(value) {
            Ok(credentials) => credentials,
            Err(e) => {
                warn!(error = %e, "stored credentials rejected");
                return AuthOutcome::NextStep(self.wizard(None));
            }
        };

        match self.apply_credentials(&credentials) {
            Ok(()) => AuthOutcome::Authenticated(authentication()),
            Err(e) => {
                warn!(error = %e, "stored MultiMC path is no longer usable");
                AuthOutcome::NextStep(self.wizard(Some(INVALID_PATH_ERROR)))
            }
        }
    }

    /// Completes the wizard from its end URI.
    ///
    /// An unusable MultiMC path re-opens the wizard with an error.
    pub fn pass_login_credentials(&mut self, end_uri: &str) -> AuthOutcome {
        let credentials = match Credentials::from_end_uri(end_uri) {
            Ok(credentials) => credentials,
            Err(e) => {
                warn!(error = %e, "wizard returned an unreadable answer");
                return AuthOutcome::NextStep(self.wizard(None));
            }
        };
        debug!(owned = ?credentials.owned, path = ?credentials.multimcpath, "wizard finished");

        if let Err(e) = self.apply_credentials(&credentials) {
            warn!(error = %e, "MultiMC path rejected");
            return AuthOutcome::NextStep(self.wizard(Some(INVALID_PATH_ERROR)));
        }

        self.host.store_credentials(credentials.to_value());
        AuthOutcome::Authenticated(authentication())
    }

    fn apply_credentials(&mut self, credentials: &Credentials) -> Result<(), PluginError> {
        let secondary = match credentials.multimcpath.as_deref() {
            Some(path) => {
                let client = MultiMcClient::with_platform(path, self.config.platform)?;
                Some(Box::new(client) as Box<dyn SecondaryManager>)
            }
            None => None,
        };
        self.secondary = secondary;
        self.owned = credentials.owned.clone();
        info!(owned = ?self.owned, multimc = self.secondary.is_some(), "credentials applied");
        Ok(())
    }

    fn wizard(&self, error: Option<&str>) -> NextStep {
        let mut start_uri = self.config.wizard_page.display().to_string();
        if let Some(error) = error {
            start_uri.push_str("?error=");
            start_uri.push_str(error);
        }
        NextStep {
            window_title: WIZARD_TITLE.into(),
            window_width: WIZARD_SIZE,
            window_height: WIZARD_SIZE,
            start_uri,
            end_uri_regex: WIZARD_END_URI_REGEX.into(),
        }
    }

    // -----------------------------------------------------------------------
    // Library queries
    // -----------------------------------------------------------------------

    pub fn get_owned_games(&self) -> Vec<Game> {
        self.owned
            .iter()
            .map(|&game| Game {
                game_id: game,
                game_title: game_name(game).to_string(),
                license: LicenseType::SinglePurchase,
            })
            .collect()
    }

    /// Last reported state of every owned game.
    pub fn get_local_games(&self) -> Vec<LocalGame> {
        self.owned
            .iter()
            .map(|&game| LocalGame::new(game, self.reconciler.status(game)))
            .collect()
    }

    pub fn get_os_compatibility(&self, game: GameId) -> OsCompatibility {
        match game {
            GameId::Minecraft => OsCompatibility::WINDOWS | OsCompatibility::MACOS,
            GameId::MinecraftDungeons => OsCompatibility::WINDOWS,
        }
    }

    /// Measures the install folder of each game on the blocking pool.
    pub async fn prepare_local_size_context(&self, games: &[GameId]) -> SizeContext {
        let mut context = SizeContext::new();
        for &game in games {
            let folder = self.locator.find_launcher_path(game, true);
            context.insert(game, size_at_path(folder).await);
        }
        context
    }

    pub fn get_local_size(&self, game: GameId, context: &SizeContext) -> Option<u64> {
        context.get(&game).copied().flatten()
    }

    /// Play time, including time recorded by MultiMC for Minecraft.
    pub fn get_game_time(&self, game: GameId) -> GameTime {
        let mut time = self.tracker.get_tracked_time(game);
        if let Some(secondary) = self.secondary.as_ref().filter(|s| s.serves(game)) {
            let other = secondary.get_time();
            time.time_played = time.time_played.saturating_add(other.time_played);
            time.last_played_time = compare(time.last_played_time, other.last_played_time);
        }
        time
    }

    // -----------------------------------------------------------------------
    // Install / launch / uninstall
    // -----------------------------------------------------------------------

    /// Downloads the platform installer and opens it. Failures are logged.
    pub async fn install_game(&self, game: GameId) {
        let Some(url) = download_url(game, self.config.platform) else {
            warn!(%game, platform = ?self.config.platform, "no installer for this platform");
            return;
        };
        let installer = match download(url).await {
            Ok(path) => path,
            Err(e) => {
                warn!(%game, url, error = %e, "installer download failed");
                return;
            }
        };
        info!(%game, path = %installer.display(), "running installer");
        if let Err(e) = open_path(&installer) {
            warn!(%game, error = %e, "failed to open installer");
        }
    }

    /// Registers a launch click; the launch itself may wait for a second
    /// click and then happen on a later tick.
    pub fn launch_game(&mut self, game: GameId) {
        let timeout = if self.secondary.as_ref().is_some_and(|s| s.serves(game)) {
            self.config.double_click_timeout
        } else {
            Duration::ZERO
        };
        for action in self.launcher.click(game, timeout, Instant::now()) {
            self.perform_launch(action);
        }
    }

    fn perform_launch(&mut self, action: LaunchAction) {
        match action {
            LaunchAction::Alternate(game) => {
                if let Some(secondary) = self.secondary.as_mut() {
                    info!(%game, "launching MultiMC");
                    if let Err(e) = secondary.launch() {
                        warn!(%game, error = %e, "failed to launch MultiMC");
                    }
                    return;
                }
                self.launch_primary(game);
            }
            LaunchAction::Primary(game) => self.launch_primary(game),
        }
    }

    fn launch_primary(&self, game: GameId) {
        let Some(path) = self.locator.find_launcher_path(game, false) else {
            warn!(%game, "cannot launch, launcher not found");
            return;
        };
        info!(%game, path = %path.display(), "launching");
        if let Err(e) = open_path(&path) {
            warn!(%game, error = %e, "failed to launch");
        }
    }

    /// Runs the platform uninstall plan. Failures are logged.
    pub fn uninstall_game(&self, game: GameId) {
        match self.locator.uninstall_plan(game) {
            UninstallPlan::Command(cmd) => {
                info!(%game, cmd, "uninstalling");
                if let Err(e) = run_command(&cmd) {
                    warn!(%game, error = %e, "uninstall command failed");
                }
            }
            UninstallPlan::Trash(path) => {
                info!(%game, path = %path.display(), "moving launcher to trash");
                if let Err(e) = move_to_trash(&path) {
                    warn!(%game, error = %e, "failed to move launcher to trash");
                }
            }
            UninstallPlan::NotFound => warn!(%game, "nothing to uninstall"),
        }
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// One pass of the reconciliation loop.
    ///
    /// Passes never overlap: the host holds `&mut self` until this returns.
    pub async fn tick(&mut self) {
        let now = Instant::now();

        if let Some(report) = self.scheduler.harvest().await {
            self.watcher.apply(&report);
        }
        if !self.owned.is_empty() {
            self.scheduler
                .try_start(now, self.watcher.table(), self.owned.clone());
        }

        if let Some(action) = self.launcher.poll(now) {
            self.perform_launch(action);
        }

        for transition in self.reconcile() {
            self.apply_transition(transition);
        }
    }

    fn reconcile(&mut self) -> Vec<Transition> {
        let mut paths = PathMemo::new(self.locator.as_ref());
        let mut transitions = Vec::with_capacity(self.owned.len());

        for &game in &self.owned {
            let secondary = self.secondary.as_mut().filter(|s| s.serves(game));
            let secondary_enabled = secondary.is_some();
            let secondary_running = secondary.is_some_and(|s| s.is_running());
            let probe = Probe {
                secondary_enabled,
                secondary_running,
                primary_running: self.watcher.is_running(game),
            };

            let (state, cause) = classify(&probe, || paths.get(game).is_some());
            transitions.push(self.reconciler.observe(game, state, cause));
        }
        transitions
    }

    fn apply_transition(&mut self, transition: Transition) {
        let game = transition.game;

        if transition.start_tracking {
            if let Err(e) = self.tracker.start_tracking(game) {
                debug!(%game, error = %e, "session already open");
            }
        }
        if transition.stop_tracking {
            match self.tracker.stop_tracking(game) {
                Ok(()) => self.persist(),
                Err(TrackerError::NotTracked(_)) => debug!(%game, "no session to close"),
                Err(e) => warn!(%game, error = %e, "failed to close session"),
            }
        }

        if transition.changed() {
            info!(%game, from = ?transition.from, to = ?transition.to, "local state changed");
            self.host
                .update_local_game_status(LocalGame::new(game, transition.to));
        }
    }

    // -----------------------------------------------------------------------
    // Session lifecycle
    // -----------------------------------------------------------------------

    /// Restores the ledger from the host cache, or the local file when the
    /// host has nothing readable.
    pub fn handshake_complete(&mut self) {
        let hosted = self.host.persistent_cache_get(TIME_CACHE_KEY);
        if self.tracker.restore(hosted.as_deref()) {
            return;
        }
        let local = self.cache_file.as_ref().and_then(CacheFile::read);
        if local.is_some() {
            debug!("restoring time cache from local file");
        }
        self.tracker.restore(local.as_deref());
    }

    /// Persists the ledger once the host has imported play times.
    pub fn game_times_import_complete(&mut self) {
        self.persist();
    }

    /// Closes open sessions and persists the ledger.
    pub fn shutdown(&mut self) {
        self.tracker.stop_all_at(Utc::now());
        self.persist();
        info!("plugin shut down");
    }

    fn persist(&self) {
        let snapshot = match self.tracker.update_cache() {
            Ok(snapshot) => snapshot,
            Err(TrackerError::StillTracking) => {
                debug!("games still being tracked, cache not updated");
                return;
            }
            Err(e) => {
                warn!(error = %e, "failed to snapshot play time");
                return;
            }
        };

        if let Some(file) = &self.cache_file {
            if let Err(e) = file.write(&snapshot) {
                warn!(path = %file.path().display(), error = %e, "failed to write time cache file");
            }
        }
        self.host.persistent_cache_set(TIME_CACHE_KEY, snapshot);
        self.host.push_cache();
    }
}

fn authentication() -> Authentication {
    Authentication {
        user_id: USER_ID.into(),
        user_name: USER_NAME.into(),
    }
}
