//! Flag snapshots and the sources that produce them

mod error;
mod file_source;

pub use error::SnapshotError;
pub use file_source::JsonFileSource;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::catalog::FlagId;

/// Point-in-time view of the flags the game-side process chose to report.
/// Flags missing from `flags` carry no information for this snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSnapshot {
    pub elapsed_ms: u64,
    #[serde(default)]
    pub flags: HashMap<FlagId, bool>,
}

impl FlagSnapshot {
    pub fn new(elapsed_ms: u64) -> Self {
        Self {
            elapsed_ms,
            flags: HashMap::new(),
        }
    }

    pub fn with_flag(mut self, flag: FlagId, value: bool) -> Self {
        self.flags.insert(flag, value);
        self
    }

    pub fn with_flags(mut self, flags: impl IntoIterator<Item = (FlagId, bool)>) -> Self {
        self.flags.extend(flags);
        self
    }

    pub fn get(&self, flag: FlagId) -> Option<bool> {
        self.flags.get(&flag).copied()
    }
}

/// Result of asking a source for fresh data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotPoll {
    Snapshot(FlagSnapshot),
    /// Nothing new since the last poll (or the payload could not be parsed)
    Unchanged,
    /// The source is not producing data at all
    Unavailable(String),
}

/// Anything that can hand the tracker a flag snapshot on demand
pub trait SnapshotSource {
    fn poll(&mut self) -> SnapshotPoll;
}
