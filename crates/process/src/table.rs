use std::path::PathBuf;
use std::sync::Mutex;

use sysinfo::{Pid, ProcessesToUpdate, System};

/// One row of the process table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub name: String,
    pub exe: Option<PathBuf>,
}

/// Access to the operating system's process table.
pub trait ProcessTable: Send + Sync {
    /// Enumerates all processes once.
    fn snapshot(&self) -> Vec<ProcessEntry>;

    /// Returns `true` if `pid` is still alive.
    fn is_alive(&self, pid: u32) -> bool;
}

/// Process table backed by `sysinfo`.
///
/// Full scans and liveness checks each own a `System`, so a pid check on the
/// tick never waits behind a whole-table refresh.
pub struct SysinfoTable {
    scan: Mutex<System>,
    liveness: Mutex<System>,
}

impl SysinfoTable {
    pub fn new() -> Self {
        Self {
            scan: Mutex::new(System::new()),
            liveness: Mutex::new(System::new()),
        }
    }
}

impl Default for SysinfoTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessTable for SysinfoTable {
    fn snapshot(&self) -> Vec<ProcessEntry> {
        let mut sys = self.scan.lock().unwrap_or_else(|e| e.into_inner());
        sys.refresh_processes(ProcessesToUpdate::All, true);

        sys.processes()
            .iter()
            .map(|(pid, process)| ProcessEntry {
                pid: pid.as_u32(),
                name: process.name().to_string_lossy().into_owned(),
                exe: process.exe().map(PathBuf::from),
            })
            .collect()
    }

    fn is_alive(&self, pid: u32) -> bool {
        let mut sys = self.liveness.lock().unwrap_or_else(|e| e.into_inner());
        let pid = Pid::from_u32(pid);
        sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        sys.process(pid).is_some()
    }
}
