//! Error types for catalog loading

use std::path::PathBuf;
use thiserror::Error;

use super::FlagId;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog TOML")]
    ParseToml(#[from] toml::de::Error),

    #[error("catalog must mark exactly one collectible as deduced, found {count}")]
    DeducedCount { count: usize },

    #[error("catalog defines no bosses")]
    NoBosses,

    #[error("flag {flag} is used more than once in the catalog")]
    DuplicateFlag { flag: FlagId },
}
