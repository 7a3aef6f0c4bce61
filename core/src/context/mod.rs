mod config;
mod error;
pub mod watcher;

pub use config::{TrackerConfig, TrackerConfigExt};
pub use error::{ConfigError, WatcherError};
pub use watcher::{SpoilerEvent, SpoilerWatcher};
