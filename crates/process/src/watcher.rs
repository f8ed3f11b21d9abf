use std::collections::HashMap;
use std::sync::Arc;

use minegate_protocol::GameId;

use crate::scan::ScanReport;
use crate::table::ProcessTable;

/// Tracks the launcher process of each game.
///
/// Holds at most one handle (pid) per game. Handles are only set or cleared
/// by applying a [`ScanReport`] and cleared when found dead by
/// [`is_running`](Self::is_running).
pub struct ProcessWatcher {
    table: Arc<dyn ProcessTable>,
    handles: HashMap<GameId, u32>,
}

impl ProcessWatcher {
    pub fn new(table: Arc<dyn ProcessTable>) -> Self {
        Self {
            table,
            handles: HashMap::new(),
        }
    }

    /// Returns the process table used for liveness checks and scans.
    pub fn table(&self) -> Arc<dyn ProcessTable> {
        Arc::clone(&self.table)
    }

    /// Returns the recorded process handle for a game.
    pub fn handle(&self, game: GameId) -> Option<u32> {
        self.handles.get(&game).copied()
    }

    /// Returns `true` if the recorded process is still alive.
    ///
    /// A dead handle is dropped. Without a handle this is always `false`.
    pub fn is_running(&mut self, game: GameId) -> bool {
        let Some(pid) = self.handle(game) else {
            return false;
        };
        if self.table.is_alive(pid) {
            return true;
        }
        tracing::debug!(%game, pid, "launcher process exited");
        self.handles.remove(&game);
        false
    }

    /// Applies a scan: matched games get their handle, every other scanned
    /// game loses it.
    pub fn apply(&mut self, report: &ScanReport) {
        for game in &report.scanned {
            match report.found.get(game) {
                Some(&pid) => {
                    if self.handles.insert(*game, pid) != Some(pid) {
                        tracing::info!(%game, pid, "found a running launcher");
                    }
                }
                None => {
                    self.handles.remove(game);
                }
            }
        }
    }
}
