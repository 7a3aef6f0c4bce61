use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Collectible,
    Boss,
}

impl EventKind {
    pub fn verb(&self) -> &'static str {
        match self {
            EventKind::Collectible => "Obtained",
            EventKind::Boss => "Defeated",
        }
    }

    /// Heading for the resolved label line
    pub fn label_heading(&self) -> &'static str {
        match self {
            EventKind::Collectible => "Location",
            EventKind::Boss => "Encounter",
        }
    }
}

/// One resolved milestone. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub kind: EventKind,
    pub primary_name: String,
    pub resolved_label: String,
    pub elapsed_ms: u64,
    /// Insertion order, starting at 1
    pub sequence: usize,
}
