use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use minegate_protocol::{GameId, GameTime};

use crate::{TrackerError, codec};

/// Accumulated play time of one game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Record {
    /// Total seconds played.
    pub seconds: u64,
    /// Unix timestamp (seconds) at which the last session ended.
    pub last_played: Option<i64>,
}

/// Per-game play-time ledger with open sessions.
#[derive(Debug, Default)]
pub struct TimeTracker {
    records: BTreeMap<GameId, Record>,
    sessions: HashMap<GameId, DateTime<Utc>>,
}

impl TimeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a ledger from a persisted snapshot.
    ///
    /// A missing or unreadable snapshot starts an empty ledger.
    pub fn from_snapshot(snapshot: Option<&str>) -> Self {
        let mut tracker = Self::new();
        tracker.restore(snapshot);
        tracker
    }

    /// Replaces the committed totals with a persisted snapshot.
    ///
    /// Open sessions are kept. An unreadable snapshot is logged and leaves
    /// the totals untouched. Returns `true` only when a snapshot was decoded.
    pub fn restore(&mut self, snapshot: Option<&str>) -> bool {
        let Some(snapshot) = snapshot else {
            tracing::debug!("no time cache to restore");
            return false;
        };
        match codec::decode(snapshot) {
            Ok(records) => {
                tracing::debug!(games = records.len(), "time cache restored");
                self.records = records;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable time cache");
                false
            }
        }
    }

    /// Seeds a game's totals, e.g. from a host import.
    pub fn set_record(&mut self, game: GameId, record: Record) {
        self.records.insert(game, record);
    }

    pub fn start_tracking(&mut self, game: GameId) -> Result<(), TrackerError> {
        self.start_tracking_at(game, Utc::now())
    }

    /// Opens a session for `game` starting at `now`.
    pub fn start_tracking_at(&mut self, game: GameId, now: DateTime<Utc>) -> Result<(), TrackerError> {
        if self.sessions.contains_key(&game) {
            return Err(TrackerError::AlreadyTracking(game));
        }
        self.sessions.insert(game, now);
        tracing::info!(%game, "tracking started");
        Ok(())
    }

    pub fn stop_tracking(&mut self, game: GameId) -> Result<(), TrackerError> {
        self.stop_tracking_at(game, Utc::now())
    }

    /// Closes the session for `game`, committing the elapsed time.
    ///
    /// The last-played time becomes `now`.
    pub fn stop_tracking_at(&mut self, game: GameId, now: DateTime<Utc>) -> Result<(), TrackerError> {
        let started = self
            .sessions
            .remove(&game)
            .ok_or(TrackerError::NotTracked(game))?;

        let elapsed = u64::try_from((now - started).num_seconds()).unwrap_or(0);
        let record = self.records.entry(game).or_default();
        record.seconds = record.seconds.saturating_add(elapsed);
        record.last_played = Some(now.timestamp());

        tracing::info!(%game, elapsed_secs = elapsed, "tracking stopped");
        Ok(())
    }

    /// Closes every open session at `now`.
    pub fn stop_all_at(&mut self, now: DateTime<Utc>) {
        let open: Vec<GameId> = self.sessions.keys().copied().collect();
        for game in open {
            if let Err(e) = self.stop_tracking_at(game, now) {
                tracing::warn!(%game, error = %e, "failed to close session");
            }
        }
    }

    pub fn is_tracking(&self, game: GameId) -> bool {
        self.sessions.contains_key(&game)
    }

    /// Games with an open session, in id order.
    pub fn tracking_games(&self) -> Vec<GameId> {
        let mut games: Vec<GameId> = self.sessions.keys().copied().collect();
        games.sort();
        games
    }

    /// Committed play time of `game` in whole minutes.
    ///
    /// Open sessions are not included until they are stopped.
    pub fn get_tracked_time(&self, game: GameId) -> GameTime {
        match self.records.get(&game) {
            Some(record) => GameTime {
                game_id: game,
                time_played: record.seconds / 60,
                last_played_time: record.last_played,
            },
            None => GameTime::never_played(game),
        }
    }

    /// Returns the snapshot to persist.
    ///
    /// Fails with [`TrackerError::StillTracking`] while a session is open,
    /// so a half-counted session is never written.
    pub fn update_cache(&self) -> Result<String, TrackerError> {
        if !self.sessions.is_empty() {
            return Err(TrackerError::StillTracking);
        }
        Ok(self.encode())
    }

    /// Snapshot of the committed totals, ignoring open sessions.
    pub fn encode(&self) -> String {
        codec::encode(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn at(ts: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(ts, 0).unwrap()
    }

    #[test]
    fn session_adds_to_existing_total() {
        let mut tracker = TimeTracker::new();
        tracker.set_record(
            GameId::Minecraft,
            Record {
                seconds: 185 * 60,
                last_played: Some(1_600_000_000),
            },
        );

        let start = at(1_700_000_000);
        let end = start + Duration::minutes(15);
        tracker.start_tracking_at(GameId::Minecraft, start).unwrap();
        tracker.stop_tracking_at(GameId::Minecraft, end).unwrap();

        let time = tracker.get_tracked_time(GameId::Minecraft);
        assert_eq!(time.time_played, 200);
        assert_eq!(time.last_played_time, Some(end.timestamp()));
    }

    #[test]
    fn double_start_is_rejected() {
        let mut tracker = TimeTracker::new();
        tracker.start_tracking_at(GameId::Minecraft, at(100)).unwrap();
        let err = tracker
            .start_tracking_at(GameId::Minecraft, at(200))
            .unwrap_err();
        assert!(matches!(err, TrackerError::AlreadyTracking(GameId::Minecraft)));

        // The first start time is kept.
        tracker.stop_tracking_at(GameId::Minecraft, at(100 + 120)).unwrap();
        assert_eq!(tracker.get_tracked_time(GameId::Minecraft).time_played, 2);
    }

    #[test]
    fn stop_without_start_leaves_state_untouched() {
        let mut tracker = TimeTracker::new();
        tracker.set_record(
            GameId::MinecraftDungeons,
            Record {
                seconds: 600,
                last_played: Some(42),
            },
        );
        let before = tracker.get_tracked_time(GameId::MinecraftDungeons);

        let err = tracker
            .stop_tracking_at(GameId::MinecraftDungeons, at(1_000))
            .unwrap_err();
        assert!(matches!(err, TrackerError::NotTracked(GameId::MinecraftDungeons)));
        assert_eq!(tracker.get_tracked_time(GameId::MinecraftDungeons), before);
        assert!(!tracker.is_tracking(GameId::MinecraftDungeons));
    }

    #[test]
    fn untracked_game_was_never_played() {
        let tracker = TimeTracker::new();
        assert_eq!(
            tracker.get_tracked_time(GameId::Minecraft),
            GameTime::never_played(GameId::Minecraft)
        );
    }

    #[test]
    fn clock_going_backwards_adds_nothing() {
        let mut tracker = TimeTracker::new();
        tracker.start_tracking_at(GameId::Minecraft, at(1_000)).unwrap();
        tracker.stop_tracking_at(GameId::Minecraft, at(500)).unwrap();
        let time = tracker.get_tracked_time(GameId::Minecraft);
        assert_eq!(time.time_played, 0);
        assert_eq!(time.last_played_time, Some(500));
    }

    #[test]
    fn update_cache_refused_while_tracking() {
        let mut tracker = TimeTracker::new();
        tracker.start_tracking_at(GameId::Minecraft, at(0)).unwrap();
        assert!(matches!(tracker.update_cache(), Err(TrackerError::StillTracking)));

        tracker.stop_tracking_at(GameId::Minecraft, at(60)).unwrap();
        assert!(tracker.update_cache().is_ok());
    }

    #[test]
    fn tracking_games_lists_open_sessions() {
        let mut tracker = TimeTracker::new();
        tracker.start_tracking_at(GameId::MinecraftDungeons, at(0)).unwrap();
        tracker.start_tracking_at(GameId::Minecraft, at(0)).unwrap();
        assert_eq!(
            tracker.tracking_games(),
            vec![GameId::Minecraft, GameId::MinecraftDungeons]
        );

        tracker.stop_all_at(at(300));
        assert!(tracker.tracking_games().is_empty());
        assert_eq!(tracker.get_tracked_time(GameId::Minecraft).time_played, 5);
        assert_eq!(tracker.get_tracked_time(GameId::MinecraftDungeons).time_played, 5);
    }

    #[test]
    fn snapshot_restores_totals() {
        let mut tracker = TimeTracker::new();
        tracker.start_tracking_at(GameId::Minecraft, at(1_000)).unwrap();
        tracker.stop_tracking_at(GameId::Minecraft, at(4_600)).unwrap();
        let snapshot = tracker.update_cache().unwrap();

        let restored = TimeTracker::from_snapshot(Some(&snapshot));
        assert_eq!(
            restored.get_tracked_time(GameId::Minecraft),
            tracker.get_tracked_time(GameId::Minecraft)
        );
        assert!(!restored.is_tracking(GameId::Minecraft));
    }

    #[test]
    fn restore_keeps_open_sessions() {
        let mut source = TimeTracker::new();
        source.set_record(
            GameId::Minecraft,
            Record {
                seconds: 600,
                last_played: Some(10),
            },
        );
        let snapshot = source.encode();

        let mut tracker = TimeTracker::new();
        tracker.start_tracking_at(GameId::Minecraft, at(1_000)).unwrap();
        assert!(tracker.restore(Some(&snapshot)));
        assert!(tracker.is_tracking(GameId::Minecraft));

        tracker.stop_tracking_at(GameId::Minecraft, at(1_060)).unwrap();
        assert_eq!(tracker.get_tracked_time(GameId::Minecraft).time_played, 11);
    }

    #[test]
    fn corrupt_snapshot_starts_empty() {
        let tracker = TimeTracker::from_snapshot(Some("not a snapshot"));
        assert_eq!(
            tracker.get_tracked_time(GameId::Minecraft),
            GameTime::never_played(GameId::Minecraft)
        );
    }

    #[test]
    fn failed_restore_reports_and_keeps_totals() {
        let mut tracker = TimeTracker::new();
        tracker.set_record(
            GameId::Minecraft,
            Record {
                seconds: 120,
                last_played: None,
            },
        );

        assert!(!tracker.restore(None));
        assert!(!tracker.restore(Some("garbage-not-hex")));
        assert_eq!(tracker.get_tracked_time(GameId::Minecraft).time_played, 2);
    }
}
