use hashbrown::{HashMap, HashSet};

use crate::catalog::{BossId, CollectibleId, FlagId};
use crate::snapshot::FlagSnapshot;

/// Everything the tracker remembers about one run.
/// Owned by the polling loop; never shared.
#[derive(Debug, Clone, Default)]
pub struct TrackingState {
    previous: HashMap<FlagId, bool>,
    /// Last derived value for the deduced collectible
    previous_deduced: Option<bool>,
    obtained: HashSet<CollectibleId>,
    defeated: HashSet<BossId>,
    initialized: bool,
}

impl TrackingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// New run: forget everything, seed again on the next snapshot
    pub fn reset(&mut self) {
        self.reseed();
        self.obtained.clear();
        self.defeated.clear();
    }

    /// Forget flag history only. Used when the snapshot source reconnects so a
    /// burst of already-set flags is not mistaken for progress.
    pub fn reseed(&mut self) {
        self.previous.clear();
        self.previous_deduced = None;
        self.initialized = false;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(super) fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    pub fn previous(&self, flag: FlagId) -> Option<bool> {
        self.previous.get(&flag).copied()
    }

    pub fn is_obtained(&self, id: CollectibleId) -> bool {
        self.obtained.contains(&id)
    }

    pub fn is_defeated(&self, id: BossId) -> bool {
        self.defeated.contains(&id)
    }

    pub fn obtained_count(&self) -> usize {
        self.obtained.len()
    }

    pub fn defeated_count(&self) -> usize {
        self.defeated.len()
    }

    /// Record the snapshot's value for `flag`. Returns true on a false→true
    /// edge. Absent flags keep their previous value; a flag seen for the
    /// first time only seeds.
    pub(super) fn observe(&mut self, flag: FlagId, snapshot: &FlagSnapshot) -> bool {
        let Some(now) = snapshot.get(flag) else {
            return false;
        };
        matches!(self.previous.insert(flag, now), Some(false)) && now
    }

    /// Value as of the latest snapshot that reported it
    pub(super) fn current(&self, flag: FlagId) -> bool {
        self.previous(flag).unwrap_or(false)
    }

    pub(super) fn observe_deduced(&mut self, now: bool) -> bool {
        matches!(self.previous_deduced.replace(now), Some(false)) && now
    }

    pub(super) fn insert_obtained(&mut self, id: CollectibleId) -> bool {
        self.obtained.insert(id)
    }

    pub(super) fn insert_defeated(&mut self, id: BossId) -> bool {
        self.defeated.insert(id)
    }
}
