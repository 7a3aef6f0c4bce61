use erdtrack_core::context::{SpoilerEvent, SpoilerWatcher, TrackerConfig, TrackerConfigExt};
use erdtrack_core::spoiler::same_document;
use erdtrack_core::{Catalog, CatalogError, JsonFileSource, PollOutcome, TrackerSession};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::Args;

/// Holds all state for the running tracker.
/// The session is driven from a single loop, so nothing here is shared.
pub struct CliContext {
    pub config: TrackerConfig,
    pub session: TrackerSession,
    source: JsonFileSource,
    /// Document given on the command line; discovery is skipped while set
    pinned_spoiler: Option<PathBuf>,
}

impl CliContext {
    /// Build the session from saved config plus command-line overrides and
    /// load the initial spoiler document. Only a bad catalog is fatal.
    pub fn new(args: &Args) -> Result<Self, CatalogError> {
        let mut config = TrackerConfig::load();
        args.apply(&mut config);
        Self::with_config(config, args.spoiler.as_ref().map(PathBuf::from))
    }

    pub fn with_config(
        config: TrackerConfig,
        pinned_spoiler: Option<PathBuf>,
    ) -> Result<Self, CatalogError> {
        let catalog = Catalog::load_or_bundled(config.catalog_path.as_deref().map(Path::new))?;
        let session = TrackerSession::new(Arc::new(catalog), config.session_options());
        let source = JsonFileSource::new(&config.snapshot_path);

        let mut ctx = Self {
            config,
            session,
            source,
            pinned_spoiler,
        };
        ctx.load_spoiler();
        Ok(ctx)
    }

    /// Load the pinned document, or the newest discovered one
    pub fn load_spoiler(&mut self) {
        match &self.pinned_spoiler {
            Some(path) => self.session.load_spoiler(path),
            None => self.session.discover_spoiler(&self.config.search_dirs()),
        };
    }

    /// Watch the spoiler directories; `None` if nothing can be watched
    pub fn spawn_watcher(&self) -> Option<SpoilerWatcher> {
        let dirs = match &self.pinned_spoiler {
            Some(path) => vec![
                path.parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from(".")),
            ],
            None => self.config.search_dirs(),
        };

        match SpoilerWatcher::new(&dirs) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                tracing::warn!(error = %e, "Spoiler documents will not be reloaded automatically");
                None
            }
        }
    }

    pub fn poll(&mut self) -> PollOutcome {
        self.session.poll(&mut self.source)
    }

    pub fn on_spoiler_event(&mut self, event: SpoilerEvent) {
        match event {
            SpoilerEvent::DocumentChanged(path) => match &self.pinned_spoiler {
                Some(pinned) => {
                    if same_document(&path, pinned) {
                        tracing::info!(path = %path.display(), "Reloading spoiler document");
                        self.session.load_spoiler(&path);
                    }
                }
                None => {
                    let search_dirs = self.config.search_dirs();
                    if self.session.document_changed(&path, &search_dirs).is_some() {
                        tracing::info!(path = %path.display(), "Reloaded spoiler document");
                    }
                }
            },
            SpoilerEvent::Error(message) => tracing::warn!(error = %message, "Spoiler watcher"),
        }
    }
}
