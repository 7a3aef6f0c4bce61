//! Catalog loading from TOML

use std::fs;
use std::path::Path;

use super::{Catalog, CatalogConfig, CatalogError};

const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.toml");

impl Catalog {
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let config: CatalogConfig = toml::from_str(content)?;
        Self::from_config(config)
    }

    /// Load a catalog document from disk
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            collectibles = catalog.collectible_count(),
            bosses = catalog.boss_count(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// The catalog shipped with the crate
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUNDLED_CATALOG)
    }

    /// Load from `path` if given, otherwise the bundled catalog
    pub fn load_or_bundled(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::bundled(),
        }
    }
}
