//! Locating spoiler documents on disk

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::SpoilerError;

/// Spoiler documents are plain `.txt` files
pub fn is_spoiler_document(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
}

/// Both paths name the same file, comparing resolved paths when they exist
pub fn same_document(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Most recently modified spoiler document directly inside `dir`,
/// ignoring anything in `exclude`
pub fn newest_document(dir: &Path, exclude: &[&Path]) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| is_spoiler_document(p))
        .filter(|p| !exclude.iter().any(|x| same_document(p, x)))
        .filter_map(|p| {
            let modified = fs::metadata(&p).and_then(|m| m.modified()).ok()?;
            Some((modified, p))
        })
        .max_by_key(|(modified, _): &(SystemTime, PathBuf)| *modified)
        .map(|(_, p)| p)
}

/// Search `dirs` in order; the first directory holding any document wins
/// and its newest document is returned. Paths in `exclude` (the tracker's
/// own output) are never candidates.
pub fn find_spoiler<P: AsRef<Path>>(
    dirs: &[P],
    exclude: &[&Path],
) -> Result<PathBuf, SpoilerError> {
    for dir in dirs {
        let dir = dir.as_ref();
        if let Some(path) = newest_document(dir, exclude) {
            tracing::debug!(dir = %dir.display(), path = %path.display(), "Found spoiler document");
            return Ok(path);
        }
    }

    Err(SpoilerError::NotFound {
        searched: dirs
            .iter()
            .map(|d| d.as_ref().display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// Seed embedded in randomizer log names such as `2024-03-01_log_123456_opts.txt`
pub fn seed_from_filename(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let (_, rest) = stem.split_once("_log_")?;
    let seed: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    (!seed.is_empty()).then_some(seed)
}
