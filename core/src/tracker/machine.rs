//! Snapshot diffing
//!
//! Each call compares one snapshot against the tracking state and returns
//! the milestones that became true. Bosses are checked before collectibles.

use crate::catalog::{Catalog, Milestone};
use crate::snapshot::FlagSnapshot;

use super::TrackingState;

/// A milestone that just happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilestoneEvent {
    pub milestone: Milestone,
    pub elapsed_ms: u64,
}

pub fn process_snapshot(
    catalog: &Catalog,
    state: &mut TrackingState,
    snapshot: &FlagSnapshot,
) -> Vec<MilestoneEvent> {
    if !state.is_initialized() {
        seed(catalog, state, snapshot);
        return Vec::new();
    }

    let mut events = Vec::new();
    let mut emit = |milestone| {
        events.push(MilestoneEvent {
            milestone,
            elapsed_ms: snapshot.elapsed_ms,
        })
    };

    // Only the final phase counts; earlier phase flags are never diffed
    for id in catalog.boss_ids() {
        let flag = catalog.boss(id).flag;
        if state.observe(flag, snapshot) && state.insert_defeated(id) {
            emit(Milestone::Boss(id));
        }
    }

    for id in catalog.specific_collectible_ids() {
        let flag = catalog.collectible(id).flag;
        if state.observe(flag, snapshot) && state.insert_obtained(id) {
            emit(Milestone::Collectible(id));
        }
    }

    let deduced = catalog.deduced_collectible();
    let now = deduce_obtained(catalog, state, snapshot);
    if state.observe_deduced(now) && state.insert_obtained(deduced) {
        emit(Milestone::Collectible(deduced));
    }

    events
}

fn seed(catalog: &Catalog, state: &mut TrackingState, snapshot: &FlagSnapshot) {
    for flag in catalog.tracked_flags() {
        state.observe(flag, snapshot);
    }
    let deduced = deduce_obtained(catalog, state, snapshot);
    state.observe_deduced(deduced);
    state.mark_initialized();
    tracing::debug!(elapsed_ms = snapshot.elapsed_ms, "Seeded tracking state");
}

/// The deduced collectible is held if its own flag says so, or if more
/// ordinal flags are set than there are identified collectibles to explain
/// them.
fn deduce_obtained(catalog: &Catalog, state: &mut TrackingState, snapshot: &FlagSnapshot) -> bool {
    let own_flag = catalog.collectible(catalog.deduced_collectible()).flag;
    state.observe(own_flag, snapshot);
    for &flag in catalog.ordinal_flags() {
        state.observe(flag, snapshot);
    }

    let ordinal_count = catalog
        .ordinal_flags()
        .iter()
        .filter(|&&flag| state.current(flag))
        .count();
    let specific_count = catalog
        .specific_collectible_ids()
        .filter(|&id| state.current(catalog.collectible(id).flag))
        .count();

    state.current(own_flag) || ordinal_count > specific_count
}
