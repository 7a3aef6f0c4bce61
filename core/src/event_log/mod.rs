//! Ordered log of resolved milestones

mod error;
mod record;
mod render;
mod writer;

pub use error::LogWriteError;
pub use record::{EventKind, EventRecord};
pub use render::{
    HEADER, PROGRESS_HEADER, Progress, ProgressTotals, format_elapsed, parse_progress, render,
};
pub use writer::LogWriter;

/// Append-only within a run; `clear` starts a new run.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
    seed: Option<String>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(
        &mut self,
        kind: EventKind,
        primary_name: impl Into<String>,
        resolved_label: impl Into<String>,
        elapsed_ms: u64,
    ) -> &EventRecord {
        let sequence = self.records.len() + 1;
        self.records.push(EventRecord {
            kind,
            primary_name: primary_name.into(),
            resolved_label: resolved_label.into(),
            elapsed_ms,
            sequence,
        });
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.records.iter().filter(|r| r.kind == kind).count()
    }

    pub fn seed(&self) -> Option<&str> {
        self.seed.as_deref()
    }

    pub fn set_seed(&mut self, seed: Option<String>) {
        self.seed = seed;
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
