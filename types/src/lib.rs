//! Shared configuration types for erdtrack
//!
//! This crate contains serializable configuration types shared between
//! the tracking library (erdtrack-core) and the command-line frontend.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_OUTPUT_PATH: &str = "logs/TrackerLog.txt";
pub const DEFAULT_SNAPSHOT_PATH: &str = "tracker_snapshot.json";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

fn default_snapshot_path() -> String {
    DEFAULT_SNAPSHOT_PATH.to_string()
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_search_dirs() -> Vec<String> {
    vec![
        "spoiler_logs".to_string(),
        "randomizer/spoiler_logs".to_string(),
        ".".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

// ─────────────────────────────────────────────────────────────────────────────
// Tracker Config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// JSON snapshot written by the cooperating game-side process
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
    /// Where the durable tracker log is written
    #[serde(default = "default_output_path")]
    pub output_path: String,
    /// Directories searched, in order, for a spoiler document when none is given
    #[serde(default = "default_search_dirs")]
    pub spoiler_search_dirs: Vec<String>,
    /// Optional TOML catalog replacing the bundled one
    #[serde(default)]
    pub catalog_path: Option<String>,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Rename the output file after the seed once the seed is known
    #[serde(default = "default_true")]
    pub name_output_by_seed: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            output_path: default_output_path(),
            spoiler_search_dirs: default_search_dirs(),
            catalog_path: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            name_output_by_seed: true,
        }
    }
}
