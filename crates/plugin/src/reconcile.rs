//! The per-game transition function of the reconciliation loop.

use std::collections::HashMap;

use minegate_protocol::{GameId, LocalGameState};

/// Cheap observations about one game, gathered once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Probe {
    /// An alternate launcher serves this game.
    pub secondary_enabled: bool,
    /// The alternate launcher reports itself running.
    pub secondary_running: bool,
    /// The process watcher holds a live launcher process.
    pub primary_running: bool,
}

/// Which rule produced an observed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cause {
    SecondaryRunning,
    PrimaryRunning,
    SecondaryConfigured,
    LauncherFound,
    Nothing,
}

/// Derives a game's state; the first matching rule wins.
///
/// `launcher_found` is only consulted when no earlier rule matched.
pub fn classify(probe: &Probe, launcher_found: impl FnOnce() -> bool) -> (LocalGameState, Cause) {
    if probe.secondary_enabled && probe.secondary_running {
        (LocalGameState::InstalledAndRunning, Cause::SecondaryRunning)
    } else if probe.primary_running {
        (LocalGameState::InstalledAndRunning, Cause::PrimaryRunning)
    } else if probe.secondary_enabled {
        (LocalGameState::Installed, Cause::SecondaryConfigured)
    } else if launcher_found() {
        (LocalGameState::Installed, Cause::LauncherFound)
    } else {
        (LocalGameState::NotInstalled, Cause::Nothing)
    }
}

/// Outcome of reconciling one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub game: GameId,
    pub from: LocalGameState,
    pub to: LocalGameState,
    /// A play-time session must be opened.
    pub start_tracking: bool,
    /// The open play-time session must be closed.
    pub stop_tracking: bool,
}

impl Transition {
    /// Whether the host must be notified.
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Last reported state per game.
///
/// Sessions are tracked only while a game runs through its own launcher:
/// entering that state opens one and leaving it for anything else closes
/// it, which includes every exit from `InstalledAndRunning`.
#[derive(Debug, Default)]
pub struct Reconciler {
    status: HashMap<GameId, LocalGameState>,
    causes: HashMap<GameId, Cause>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last reported state; `NotInstalled` before the first observation.
    pub fn status(&self, game: GameId) -> LocalGameState {
        self.status.get(&game).copied().unwrap_or_default()
    }

    /// Records an observation and returns what it implies.
    pub fn observe(&mut self, game: GameId, to: LocalGameState, cause: Cause) -> Transition {
        let from = self.status(game);
        let was_primary = self.causes.get(&game) == Some(&Cause::PrimaryRunning);
        let is_primary = cause == Cause::PrimaryRunning;

        self.status.insert(game, to);
        self.causes.insert(game, cause);

        Transition {
            game,
            from,
            to,
            start_tracking: is_primary && !was_primary,
            stop_tracking: was_primary && !is_primary,
        }
    }
}
