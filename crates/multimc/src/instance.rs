//! `instance.cfg` parsing.

use std::path::Path;

const TOTAL_TIME_KEY: &str = "totalTimePlayed";
const LAST_LAUNCH_KEY: &str = "lastLaunchTime";

/// Play statistics of one MultiMC instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstanceStats {
    /// Total seconds played.
    pub total_time_played: u64,
    /// Last launch, milliseconds since the Unix epoch.
    pub last_launch_ms: Option<i64>,
}

/// Parses the `key=value` lines of an `instance.cfg`.
///
/// Unknown keys and values that are not integers are ignored.
pub fn parse_instance_cfg(content: &str) -> InstanceStats {
    let mut stats = InstanceStats::default();

    for line in content.lines() {
        let Some((key, value)) = line.trim().split_once('=') else {
            continue;
        };
        match key.trim() {
            TOTAL_TIME_KEY => {
                if let Ok(secs) = value.trim().parse::<u64>() {
                    stats.total_time_played = stats.total_time_played.saturating_add(secs);
                }
            }
            LAST_LAUNCH_KEY => {
                if let Ok(ms) = value.trim().parse::<i64>() {
                    stats.last_launch_ms = Some(stats.last_launch_ms.map_or(ms, |t| t.max(ms)));
                }
            }
            _ => {}
        }
    }

    stats
}

/// Reads every `<instances>/<name>/instance.cfg` and sums the statistics.
///
/// Play time is added up; the last launch is the most recent one. Missing
/// folders and unreadable files are skipped.
pub(crate) fn aggregate(instances: &Path) -> InstanceStats {
    let mut total = InstanceStats::default();

    let Ok(entries) = std::fs::read_dir(instances) else {
        tracing::debug!(path = %instances.display(), "no MultiMC instances folder");
        return total;
    };

    for entry in entries.flatten() {
        if !entry.file_type().is_ok_and(|t| t.is_dir()) {
            continue;
        }
        let cfg = entry.path().join("instance.cfg");
        let content = match std::fs::read_to_string(&cfg) {
            Ok(content) => content,
            Err(e) => {
                tracing::trace!(path = %cfg.display(), error = %e, "skipping instance");
                continue;
            }
        };

        let stats = parse_instance_cfg(&content);
        total.total_time_played = total.total_time_played.saturating_add(stats.total_time_played);
        total.last_launch_ms = match (total.last_launch_ms, stats.last_launch_ms) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_instance(root: &Path, name: &str, content: &str) {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("instance.cfg"), content).unwrap();
    }

    #[test]
    fn parses_time_and_launch() {
        let cfg = "InstanceType=OneSix\nname=Vanilla\ntotalTimePlayed=3600\nlastLaunchTime=1700000000123\n";
        let stats = parse_instance_cfg(cfg);
        assert_eq!(stats.total_time_played, 3600);
        assert_eq!(stats.last_launch_ms, Some(1_700_000_000_123));
    }

    #[test]
    fn malformed_lines_are_ignored() {
        let cfg = "garbage\ntotalTimePlayed=abc\n=5\nlastLaunchTime=\ntotalTimePlayed=60";
        let stats = parse_instance_cfg(cfg);
        assert_eq!(stats.total_time_played, 60);
        assert_eq!(stats.last_launch_ms, None);
    }

    #[test]
    fn never_launched_instance() {
        let stats = parse_instance_cfg("name=Fresh\n");
        assert_eq!(stats, InstanceStats::default());
    }

    #[test]
    fn aggregate_sums_and_takes_latest() {
        let tmp = tempfile::tempdir().unwrap();
        write_instance(
            tmp.path(),
            "a",
            "totalTimePlayed=600\nlastLaunchTime=1000\n",
        );
        write_instance(
            tmp.path(),
            "b",
            "totalTimePlayed=1200\nlastLaunchTime=5000\n",
        );
        write_instance(tmp.path(), "c", "name=never played\n");
        // Not an instance folder.
        std::fs::write(tmp.path().join("instgroups.json"), "{}").unwrap();
        // Instance folder without a config.
        std::fs::create_dir_all(tmp.path().join("broken")).unwrap();

        let total = aggregate(tmp.path());
        assert_eq!(total.total_time_played, 1800);
        assert_eq!(total.last_launch_ms, Some(5000));
    }

    #[test]
    fn aggregate_missing_folder_is_empty() {
        let total = aggregate(Path::new("/nonexistent/multimc/instances"));
        assert_eq!(total, InstanceStats::default());
    }
}
