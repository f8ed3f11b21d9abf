//! Play-time ledger.
//!
//! Accrues seconds per game between `start_tracking` and `stop_tracking`,
//! and snapshots the totals into a hex-wrapped, versioned text encoding
//! that the host persists between sessions.

mod codec;
mod error;
mod file;
mod ledger;

pub use codec::{decode, encode};
pub use error::TrackerError;
pub use file::CacheFile;
pub use ledger::{Record, TimeTracker};

/// Merges two optional timestamps.
///
/// A missing side yields the other one; two values yield the earlier.
pub fn compare(a: Option<i64>, b: Option<i64>) -> Option<i64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}
