//! Launcher process detection.
//!
//! Finding a launcher means walking the whole process table, which is slow.
//! The work is split in two:
//!
//! - **Scan**: [`ScanScheduler`] runs at most one full enumeration at a time
//!   on the blocking pool, spaced by a minimum interval, and hands back a
//!   [`ScanReport`].
//! - **Watch**: [`ProcessWatcher`] keeps one process handle per game, set or
//!   cleared by applying a report, and answers "still running?" with a cheap
//!   single-pid liveness check.

mod scan;
mod signature;
mod table;
mod watcher;

pub use scan::{DEFAULT_SCAN_INTERVAL, ScanReport, ScanScheduler, scan};
pub use signature::{ProcessSignature, signatures};
pub use table::{ProcessEntry, ProcessTable, SysinfoTable};
pub use watcher::ProcessWatcher;
