//! Durable output for the rendered event log
//!
//! Every write replaces the whole file: the text goes to a sibling temp
//! file which is then renamed over the target, so readers only ever see a
//! complete log.

use std::fs;
use std::path::{Path, PathBuf};

use super::LogWriteError;

#[derive(Debug, Clone)]
pub struct LogWriter {
    path: PathBuf,
}

impl LogWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Point at a new file. The caller rewrites the full log afterwards.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    pub fn write(&self, text: &str) -> Result<(), LogWriteError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| LogWriteError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let tmp = self.temp_path();
        fs::write(&tmp, text).map_err(|source| LogWriteError::WriteFile {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| LogWriteError::Rename {
            from: tmp.clone(),
            to: self.path.clone(),
            source,
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
