//! Tracker configuration
//!
//! The shared `TrackerConfig` lives in erdtrack-types; this module adds
//! persistence through confy and the conversions the session needs.

use std::path::{Path, PathBuf};

pub use erdtrack_types::TrackerConfig;

use super::ConfigError;
use crate::session::SessionOptions;

const APP_NAME: &str = "erdtrack";
const CONFIG_NAME: &str = "config";

/// Extension trait for TrackerConfig persistence
pub trait TrackerConfigExt: Sized {
    /// Load from the platform config directory, falling back to defaults
    fn load() -> Self;
    fn try_load() -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn config_file() -> Result<PathBuf, ConfigError>;

    fn load_from(path: &Path) -> Result<Self, ConfigError>;
    fn save_to(&self, path: &Path) -> Result<(), ConfigError>;

    fn session_options(&self) -> SessionOptions;
    fn search_dirs(&self) -> Vec<PathBuf>;
}

impl TrackerConfigExt for TrackerConfig {
    fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Using default configuration");
            Self::default()
        })
    }

    fn try_load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, CONFIG_NAME)?)
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self.clone()).map_err(ConfigError::Save)
    }

    fn config_file() -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Locate)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Ok(confy::load_path(path)?)
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        confy::store_path(path, self.clone()).map_err(ConfigError::Save)
    }

    fn session_options(&self) -> SessionOptions {
        SessionOptions {
            output_path: PathBuf::from(&self.output_path),
            name_output_by_seed: self.name_output_by_seed,
        }
    }

    fn search_dirs(&self) -> Vec<PathBuf> {
        self.spoiler_search_dirs.iter().map(PathBuf::from).collect()
    }
}
