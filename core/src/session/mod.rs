//! One tracking session
//!
//! Owns the tracking state, the current spoiler index and the event log.
//! The polling loop drives it one `poll` at a time; nothing here is shared
//! across threads. A spoiler reload builds a complete index before swapping
//! it in, so a poll never sees a half-built index.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::{Catalog, Milestone};
use crate::event_log::{EventKind, EventLog, EventRecord, LogWriter, ProgressTotals, render};
use crate::snapshot::{FlagSnapshot, SnapshotPoll, SnapshotSource};
use crate::spoiler::{Classifier, SpoilerIndex, SpoilerParser, find_spoiler, same_document};
use crate::tracker::{MilestoneEvent, TrackingState, process_snapshot};


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpoilerStatus {
    NotLoaded,
    Loaded {
        path: PathBuf,
        seed: Option<String>,
    },
    Failed {
        path: Option<PathBuf>,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    Available,
    Unavailable(String),
}

/// What one poll did
#[derive(Debug, Default)]
pub struct PollOutcome {
    pub events: Vec<EventRecord>,
    /// Set when the snapshot source changed availability during this poll
    pub source_status: Option<SourceStatus>,
    /// Set when the log could not be written; retried on the next poll
    pub write_error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub output_path: PathBuf,
    /// Derive the output file name from the seed once it is known
    pub name_output_by_seed: bool,
}

pub struct TrackerSession {
    catalog: Arc<Catalog>,
    classifier: Classifier,
    state: TrackingState,
    spoiler: Arc<SpoilerIndex>,
    spoiler_status: SpoilerStatus,
    log: EventLog,
    writer: LogWriter,
    options: SessionOptions,
    source_status: Option<SourceStatus>,
    /// Last write failed; rewrite on the next poll even without new events
    needs_write: bool,
}

impl TrackerSession {
    pub fn new(catalog: Arc<Catalog>, options: SessionOptions) -> Self {
        let classifier = Classifier::new(catalog.named_checks());
        Self {
            catalog,
            classifier,
            state: TrackingState::new(),
            spoiler: Arc::new(SpoilerIndex::empty()),
            spoiler_status: SpoilerStatus::NotLoaded,
            log: EventLog::new(),
            writer: LogWriter::new(&options.output_path),
            options,
            source_status: None,
            needs_write: false,
        }
    }

    // Accessor methods

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &TrackingState {
        &self.state
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn spoiler(&self) -> Arc<SpoilerIndex> {
        Arc::clone(&self.spoiler)
    }

    pub fn spoiler_status(&self) -> &SpoilerStatus {
        &self.spoiler_status
    }

    pub fn source_status(&self) -> Option<&SourceStatus> {
        self.source_status.as_ref()
    }

    pub fn output_path(&self) -> &Path {
        self.writer.path()
    }

    pub fn progress_totals(&self) -> ProgressTotals {
        ProgressTotals {
            collectible_label: self.catalog.collectible_label().to_string(),
            collectible_total: self.catalog.collectible_count(),
            boss_label: self.catalog.boss_label().to_string(),
            boss_total: self.catalog.boss_count(),
        }
    }

    pub fn render(&self) -> String {
        render(&self.log, &self.progress_totals())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Spoiler loading
    // ─────────────────────────────────────────────────────────────────────────

    /// Load a spoiler document, replacing the current index on success.
    /// On failure the previous index stays in use.
    pub fn load_spoiler(&mut self, path: &Path) -> &SpoilerStatus {
        let parser = SpoilerParser::new(&self.catalog, &self.classifier);
        match parser.load(path) {
            Ok(index) => self.install_spoiler(index),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Spoiler load failed");
                self.spoiler_status = SpoilerStatus::Failed {
                    path: Some(path.to_path_buf()),
                    reason: error_chain(&e),
                };
            }
        }
        &self.spoiler_status
    }

    /// Load the newest document from the first search directory that has one
    pub fn discover_spoiler<P: AsRef<Path>>(&mut self, search_dirs: &[P]) -> &SpoilerStatus {
        let found = find_spoiler(search_dirs, &self.own_outputs());
        match found {
            Ok(path) => self.load_spoiler(&path),
            Err(e) => {
                tracing::info!(error = %e, "No spoiler document available");
                self.spoiler_status = SpoilerStatus::Failed {
                    path: None,
                    reason: e.to_string(),
                };
                &self.spoiler_status
            }
        }
    }

    /// A document in a search directory was created or rewritten. It is
    /// loaded only when discovery would now pick it; anything else in the
    /// directories (notes, our own log) leaves the current index alone.
    pub fn document_changed<P: AsRef<Path>>(
        &mut self,
        path: &Path,
        search_dirs: &[P],
    ) -> Option<&SpoilerStatus> {
        let winner = match find_spoiler(search_dirs, &self.own_outputs()) {
            Ok(winner) => winner,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Ignoring document change");
                return None;
            }
        };
        if !same_document(&winner, path) {
            tracing::debug!(
                path = %path.display(),
                current = %winner.display(),
                "Ignoring document that discovery would not pick"
            );
            return None;
        }
        Some(self.load_spoiler(&winner))
    }

    fn own_outputs(&self) -> [&Path; 2] {
        [self.options.output_path.as_path(), self.writer.path()]
    }

    /// Reload whatever document is currently loaded
    pub fn reload_spoiler(&mut self) -> Option<&SpoilerStatus> {
        let path = match &self.spoiler_status {
            SpoilerStatus::Loaded { path, .. } => path.clone(),
            SpoilerStatus::Failed {
                path: Some(path), ..
            } => path.clone(),
            _ => return None,
        };
        Some(self.load_spoiler(&path))
    }

    pub fn install_spoiler(&mut self, index: SpoilerIndex) {
        self.spoiler_status = SpoilerStatus::Loaded {
            path: index.source().map(Path::to_path_buf).unwrap_or_default(),
            seed: index.seed().map(str::to_string),
        };
        let seed = index.seed().map(str::to_string);
        self.spoiler = Arc::new(index);
        self.apply_seed(seed);
    }

    /// Every installed document decides the seed, including "no seed"
    fn apply_seed(&mut self, seed: Option<String>) {
        if seed.as_deref() == self.log.seed() {
            return;
        }

        if self.options.name_output_by_seed {
            let target = match &seed {
                Some(seed) => seeded_output_path(&self.options.output_path, seed),
                None => self.options.output_path.clone(),
            };
            if target != self.writer.path() {
                tracing::info!(path = %target.display(), "Output renamed for seed");
                self.writer.set_path(target);
            }
        }
        self.log.set_seed(seed);
        // Header changed and possibly the target too: rebuild the whole file
        if let Err(e) = self.write() {
            tracing::warn!(error = %e, "Failed to rewrite tracker log");
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Polling
    // ─────────────────────────────────────────────────────────────────────────

    /// One tick of the polling loop. Never fails: problems are reported in
    /// the outcome and tracking continues.
    pub fn poll(&mut self, source: &mut dyn SnapshotSource) -> PollOutcome {
        let mut outcome = PollOutcome::default();

        match source.poll() {
            SnapshotPoll::Snapshot(snapshot) => {
                if self.source_status != Some(SourceStatus::Available) {
                    if matches!(self.source_status, Some(SourceStatus::Unavailable(_))) {
                        // Reconnected: seed again rather than replaying old progress
                        self.state.reseed();
                    }
                    self.set_source_status(SourceStatus::Available, &mut outcome);
                }
                outcome.events = self.process(&snapshot);
            }
            SnapshotPoll::Unchanged => {}
            SnapshotPoll::Unavailable(reason) => {
                if !matches!(self.source_status, Some(SourceStatus::Unavailable(_))) {
                    self.set_source_status(SourceStatus::Unavailable(reason), &mut outcome);
                }
            }
        }

        if !outcome.events.is_empty() {
            self.needs_write = true;
        }
        if self.needs_write
            && let Err(e) = self.write()
        {
            outcome.write_error = Some(e);
        }
        outcome
    }

    fn set_source_status(&mut self, status: SourceStatus, outcome: &mut PollOutcome) {
        match &status {
            SourceStatus::Available => tracing::info!("Snapshot source available"),
            SourceStatus::Unavailable(reason) => {
                tracing::warn!(reason = %reason, "Snapshot source unavailable")
            }
        }
        self.source_status = Some(status.clone());
        outcome.source_status = Some(status);
    }

    /// Diff one snapshot and append the resolved events to the log.
    /// Does not write; `poll` handles output.
    pub fn process(&mut self, snapshot: &FlagSnapshot) -> Vec<EventRecord> {
        let events = process_snapshot(&self.catalog, &mut self.state, snapshot);
        events
            .into_iter()
            .map(|event| self.record(event))
            .collect()
    }

    fn record(&mut self, event: MilestoneEvent) -> EventRecord {
        let (kind, label) = match event.milestone {
            Milestone::Collectible(id) => (
                EventKind::Collectible,
                self.spoiler.get_location(id).to_string(),
            ),
            Milestone::Boss(id) => (EventKind::Boss, self.spoiler.boss_label(&self.catalog, id)),
        };
        let name = self.catalog.milestone_name(event.milestone).to_string();
        let record = self.log.append(kind, name, label, event.elapsed_ms).clone();

        tracing::info!(
            sequence = record.sequence,
            kind = ?record.kind,
            name = %record.primary_name,
            label = %record.resolved_label,
            elapsed_ms = record.elapsed_ms,
            "Milestone reached"
        );
        record
    }

    /// Start a new run: forget all progress and the log
    pub fn reset(&mut self) -> Result<(), String> {
        self.state.reset();
        self.log.clear();
        tracing::info!("Tracking state reset");
        self.write()
    }

    /// Rebuild the durable log from the in-memory records
    pub fn write(&mut self) -> Result<(), String> {
        match self.writer.write(&self.render()) {
            Ok(()) => {
                self.needs_write = false;
                Ok(())
            }
            Err(e) => {
                self.needs_write = true;
                let message = error_chain(&e);
                tracing::warn!(path = %self.writer.path().display(), error = %message, "Log write failed");
                Err(message)
            }
        }
    }
}

/// `logs/TrackerLog.txt` + `1234` → `logs/TrackerLog_1234.txt`
pub fn seeded_output_path(base: &Path, seed: &str) -> PathBuf {
    let stem = base
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("TrackerLog");
    let name = match base.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}_{seed}.{ext}"),
        None => format!("{stem}_{seed}"),
    };
    base.with_file_name(name)
}

fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
