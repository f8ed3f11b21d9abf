use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use minegate_protocol::GameId;
use tokio::task::JoinHandle;

use crate::signature::signatures;
use crate::table::ProcessTable;

/// Default minimum spacing between two process scans.
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(5);

/// Result of one full process-table enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Matched process id per game.
    pub found: HashMap<GameId, u32>,
    /// Games the scan looked for.
    pub scanned: Vec<GameId>,
}

/// Enumerates the process table once and matches every game's signatures.
///
/// The first matching process wins for each game.
pub fn scan(table: &dyn ProcessTable, games: &[GameId]) -> ScanReport {
    let entries = table.snapshot();
    let mut found = HashMap::new();

    for game in games {
        let sigs = signatures(*game);
        if let Some(entry) = entries
            .iter()
            .find(|entry| sigs.iter().any(|sig| sig.matches(entry)))
        {
            found.insert(*game, entry.pid);
        }
    }

    tracing::trace!(processes = entries.len(), matched = found.len(), "process scan done");
    ScanReport {
        found,
        scanned: games.to_vec(),
    }
}

/// Runs at most one background scan at a time, spaced by a minimum interval.
///
/// The caller drives it every tick: first [`harvest`](Self::harvest) a
/// finished scan, then [`try_start`](Self::try_start) the next one. A scan
/// that is still running is never cancelled; its report is picked up on a
/// later tick.
pub struct ScanScheduler {
    min_interval: Duration,
    task: Option<JoinHandle<ScanReport>>,
    last_started: Option<Instant>,
}

impl ScanScheduler {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            task: None,
            last_started: None,
        }
    }

    /// Returns `true` while a scan task is running.
    pub fn is_in_flight(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Returns `true` if a new scan may start at `now`.
    pub fn can_start(&self, now: Instant) -> bool {
        if self.task.is_some() {
            // Running, or finished but not harvested yet.
            return false;
        }
        self.last_started
            .is_none_or(|started| now.saturating_duration_since(started) >= self.min_interval)
    }

    /// Starts a scan on the blocking pool if allowed. Returns whether it did.
    pub fn try_start(
        &mut self,
        now: Instant,
        table: Arc<dyn ProcessTable>,
        games: Vec<GameId>,
    ) -> bool {
        if !self.can_start(now) {
            return false;
        }
        self.last_started = Some(now);
        self.task = Some(tokio::task::spawn_blocking(move || {
            scan(table.as_ref(), &games)
        }));
        tracing::trace!("process scan started");
        true
    }

    /// Takes the report of a finished scan, if there is one.
    pub async fn harvest(&mut self) -> Option<ScanReport> {
        if !self.task.as_ref().is_some_and(JoinHandle::is_finished) {
            return None;
        }
        let task = self.task.take()?;
        match task.await {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::warn!(error = %e, "process scan task failed");
                None
            }
        }
    }
}

impl Default for ScanScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;

    use super::*;
    use crate::table::ProcessEntry;

    struct StaticTable {
        entries: Vec<ProcessEntry>,
        snapshots: AtomicUsize,
    }

    impl StaticTable {
        fn new(entries: Vec<ProcessEntry>) -> Self {
            Self {
                entries,
                snapshots: AtomicUsize::new(0),
            }
        }
    }

    impl ProcessTable for StaticTable {
        fn snapshot(&self) -> Vec<ProcessEntry> {
            self.snapshots.fetch_add(1, Ordering::SeqCst);
            self.entries.clone()
        }

        fn is_alive(&self, pid: u32) -> bool {
            self.entries.iter().any(|e| e.pid == pid)
        }
    }

    /// Blocks every snapshot until released.
    struct GatedTable {
        gate: Mutex<mpsc::Receiver<()>>,
    }

    impl ProcessTable for GatedTable {
        fn snapshot(&self) -> Vec<ProcessEntry> {
            let _ = self.gate.lock().unwrap().recv();
            Vec::new()
        }

        fn is_alive(&self, _pid: u32) -> bool {
            false
        }
    }

    fn launcher(pid: u32, name: &str) -> ProcessEntry {
        ProcessEntry {
            pid,
            name: name.into(),
            exe: None,
        }
    }

    async fn wait_for_report(scheduler: &mut ScanScheduler) -> ScanReport {
        for _ in 0..500 {
            if let Some(report) = scheduler.harvest().await {
                return report;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("scan did not finish");
    }

    #[test]
    fn scan_matches_each_game() {
        let table = StaticTable::new(vec![
            launcher(10, "explorer.exe"),
            launcher(11, "MinecraftLauncher.exe"),
            launcher(12, "Dungeons.exe"),
        ]);
        let report = scan(&table, GameId::all());
        assert_eq!(report.found.get(&GameId::Minecraft), Some(&11));
        assert_eq!(report.found.get(&GameId::MinecraftDungeons), Some(&12));
        assert_eq!(report.scanned, GameId::all().to_vec());
        assert_eq!(table.snapshots.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn scan_without_match_reports_nothing() {
        let table = StaticTable::new(vec![launcher(10, "explorer.exe")]);
        let report = scan(&table, &[GameId::Minecraft]);
        assert!(report.found.is_empty());
        assert_eq!(report.scanned, vec![GameId::Minecraft]);
    }

    #[tokio::test]
    async fn second_scan_inside_interval_is_suppressed() {
        let table: Arc<dyn ProcessTable> =
            Arc::new(StaticTable::new(vec![launcher(11, "minecraftlauncher.exe")]));
        let mut scheduler = ScanScheduler::new(Duration::from_secs(5));
        let t0 = Instant::now();

        assert!(scheduler.try_start(t0, Arc::clone(&table), GameId::all().to_vec()));
        let report = wait_for_report(&mut scheduler).await;
        assert_eq!(report.found.get(&GameId::Minecraft), Some(&11));

        // Finished, but the interval has not elapsed yet.
        let t1 = t0 + Duration::from_secs(2);
        assert!(!scheduler.try_start(t1, Arc::clone(&table), GameId::all().to_vec()));

        let t2 = t0 + Duration::from_secs(5);
        assert!(scheduler.try_start(t2, table, GameId::all().to_vec()));
    }

    #[tokio::test]
    async fn scans_never_overlap() {
        let (release, gate) = mpsc::channel();
        let table: Arc<dyn ProcessTable> = Arc::new(GatedTable {
            gate: Mutex::new(gate),
        });
        let mut scheduler = ScanScheduler::new(Duration::ZERO);
        let t0 = Instant::now();

        assert!(scheduler.try_start(t0, Arc::clone(&table), GameId::all().to_vec()));
        assert!(scheduler.is_in_flight());
        assert!(scheduler.harvest().await.is_none());

        // Well past the interval, but the first scan is still running.
        let later = t0 + Duration::from_secs(60);
        assert!(!scheduler.try_start(later, Arc::clone(&table), GameId::all().to_vec()));

        release.send(()).unwrap();
        let report = wait_for_report(&mut scheduler).await;
        assert!(report.found.is_empty());
        assert!(!scheduler.is_in_flight());

        assert!(scheduler.try_start(later, table, GameId::all().to_vec()));
        release.send(()).unwrap();
        wait_for_report(&mut scheduler).await;
    }

    #[tokio::test]
    async fn harvest_without_task_is_none() {
        let mut scheduler = ScanScheduler::default();
        assert!(scheduler.harvest().await.is_none());
        assert!(scheduler.can_start(Instant::now()));
    }
}
