//! Snapshot source backed by a JSON file rewritten by the game-side process

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::{FlagSnapshot, SnapshotError, SnapshotPoll, SnapshotSource};

/// Identity of the last file revision that was read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: Option<SystemTime>,
    len: u64,
}

pub struct JsonFileSource {
    path: PathBuf,
    last_read: Option<FileStamp>,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_read: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<FlagSnapshot, SnapshotError> {
        let content = fs::read_to_string(&self.path).map_err(|source| SnapshotError::ReadFile {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SnapshotError::Malformed {
            path: self.path.clone(),
            source,
        })
    }
}

impl SnapshotSource for JsonFileSource {
    fn poll(&mut self) -> SnapshotPoll {
        let metadata = match fs::metadata(&self.path) {
            Ok(m) => m,
            Err(e) => {
                self.last_read = None;
                return SnapshotPoll::Unavailable(format!(
                    "snapshot {} unavailable: {}",
                    self.path.display(),
                    e
                ));
            }
        };

        let stamp = FileStamp {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        };
        if self.last_read == Some(stamp) {
            return SnapshotPoll::Unchanged;
        }

        match self.read() {
            Ok(snapshot) => {
                self.last_read = Some(stamp);
                SnapshotPoll::Snapshot(snapshot)
            }
            Err(e) => {
                // Usually a half-written file; the next revision is read normally
                tracing::debug!(error = %e, "Skipping unreadable snapshot");
                SnapshotPoll::Unchanged
            }
        }
    }
}
