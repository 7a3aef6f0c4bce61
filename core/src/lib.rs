pub mod catalog;
pub mod context;
pub mod event_log;
pub mod session;
pub mod snapshot;
pub mod spoiler;
pub mod tracker;

// Re-exports for convenience
pub use catalog::{BossId, Catalog, CatalogError, CollectibleId, FlagId, Milestone};
pub use context::{
    ConfigError, SpoilerEvent, SpoilerWatcher, TrackerConfig, TrackerConfigExt, WatcherError,
};
pub use event_log::{EventKind, EventLog, EventRecord, LogWriteError};
pub use session::{PollOutcome, SessionOptions, SourceStatus, SpoilerStatus, TrackerSession};
pub use snapshot::{FlagSnapshot, JsonFileSource, SnapshotError, SnapshotPoll, SnapshotSource};
pub use spoiler::{Classifier, SpoilerError, SpoilerIndex, SpoilerParser};
pub use tracker::{MilestoneEvent, TrackingState, process_snapshot};
