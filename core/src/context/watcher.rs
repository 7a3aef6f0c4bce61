use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::{self, Receiver};

use super::WatcherError;
use crate::spoiler::is_spoiler_document;

pub enum SpoilerEvent {
    /// A spoiler document was created or rewritten
    DocumentChanged(PathBuf),
    Error(String),
}

/// Watches the spoiler search directories for new or rewritten documents
pub struct SpoilerWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    watched: Vec<PathBuf>,
    /// A different document seen while folding duplicate events
    pending: Option<PathBuf>,
}

impl SpoilerWatcher {
    /// Watch every directory in `dirs` that exists. Missing directories are
    /// skipped; it is an error only when none can be watched.
    pub fn new<P: AsRef<Path>>(dirs: &[P]) -> Result<Self, WatcherError> {
        let (tx, rx) = mpsc::channel(100);

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.blocking_send(res);
            },
            Config::default(),
        )
        .map_err(WatcherError::InitWatcher)?;

        let mut watched = Vec::new();
        for dir in dirs {
            let dir = dir.as_ref();
            if !dir.is_dir() {
                tracing::debug!(dir = %dir.display(), "Skipping missing spoiler directory");
                continue;
            }
            watcher
                .watch(dir, RecursiveMode::NonRecursive)
                .map_err(|source| WatcherError::WatchPath {
                    path: dir.to_path_buf(),
                    source,
                })?;
            watched.push(dir.to_path_buf());
        }

        if watched.is_empty() {
            return Err(WatcherError::NothingToWatch);
        }
        tracing::info!(dirs = ?watched, "Watching spoiler directories");

        Ok(Self {
            _watcher: watcher,
            rx,
            watched,
            pending: None,
        })
    }

    pub fn watched(&self) -> &[PathBuf] {
        &self.watched
    }

    pub async fn next_event(&mut self) -> Option<SpoilerEvent> {
        if let Some(path) = self.pending.take() {
            return Some(SpoilerEvent::DocumentChanged(path));
        }
        while let Some(event_result) = self.rx.recv().await {
            match event_result {
                Ok(event) => {
                    if let Some(path) = document_path(&event) {
                        // A single save usually fires several events; fold the queued ones
                        self.drain_duplicates(&path);
                        tracing::debug!(path = %path.display(), "Spoiler document changed");
                        return Some(SpoilerEvent::DocumentChanged(path));
                    }
                }
                Err(e) => {
                    return Some(SpoilerEvent::Error(format!(
                        "Spoiler watcher error: {}",
                        e
                    )));
                }
            }
        }
        None
    }

    fn drain_duplicates(&mut self, path: &Path) {
        while let Ok(Ok(event)) = self.rx.try_recv() {
            if let Some(other) = document_path(&event)
                && other != path
            {
                self.pending = Some(other);
            }
        }
    }
}

fn document_path(event: &Event) -> Option<PathBuf> {
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) => event
            .paths
            .iter()
            .find(|p| is_spoiler_document(p))
            .cloned(),
        _ => None,
    }
}
