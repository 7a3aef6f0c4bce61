//! Error types for spoiler document loading

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpoilerError {
    #[error("failed to read spoiler document {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no spoiler document found in {searched}")]
    NotFound { searched: String },
}
