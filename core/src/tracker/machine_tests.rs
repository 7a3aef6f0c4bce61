//! Tests for snapshot diffing
//!
//! All tests run against the bundled catalog.

use crate::catalog::{BossId, Catalog, CollectibleId, FlagId, Milestone};
use crate::snapshot::FlagSnapshot;

use super::{MilestoneEvent, TrackingState, process_snapshot};

const GODRICK_RUNE: FlagId = 171;
const RADAHN_RUNE: FlagId = 172;
const UNBORN_RUNE: FlagId = 177;
const ORDINALS: [FlagId; 7] = [181, 182, 183, 184, 185, 186, 187];

const GODRICK_BOSS: FlagId = 10000800;
const RENNALA_PHASE_1: FlagId = 14000801;
const RENNALA_FINAL: FlagId = 14000800;

fn catalog() -> Catalog {
    Catalog::bundled().expect("bundled catalog")
}

fn boss_id(catalog: &Catalog, flag: FlagId) -> BossId {
    catalog
        .boss_ids()
        .find(|id| catalog.boss(*id).flag == flag)
        .unwrap()
}

fn collectible_id(catalog: &Catalog, flag: FlagId) -> CollectibleId {
    catalog
        .collectible_ids()
        .find(|id| catalog.collectible(*id).flag == flag)
        .unwrap()
}

/// Snapshot reporting every tracked flag, all false except `set`
fn full_snapshot(catalog: &Catalog, elapsed_ms: u64, set: &[FlagId]) -> FlagSnapshot {
    let phase_flags = catalog
        .boss_ids()
        .flat_map(|id| catalog.boss(id).phase_flags.clone())
        .collect::<Vec<_>>();
    FlagSnapshot::new(elapsed_ms).with_flags(
        catalog
            .tracked_flags()
            .chain(phase_flags)
            .map(|flag| (flag, set.contains(&flag))),
    )
}

fn ordinals(count: usize) -> Vec<FlagId> {
    ORDINALS[..count].to_vec()
}

#[test]
fn test_first_snapshot_only_seeds() {
    let catalog = catalog();
    let mut state = TrackingState::new();

    let seeded = full_snapshot(&catalog, 0, &[GODRICK_BOSS, GODRICK_RUNE, ORDINALS[0]]);
    assert!(process_snapshot(&catalog, &mut state, &seeded).is_empty());
    assert!(state.is_initialized());
    assert_eq!(state.previous(GODRICK_BOSS), Some(true));

    // Unchanged follow-up fires nothing either
    let again = full_snapshot(&catalog, 100, &[GODRICK_BOSS, GODRICK_RUNE, ORDINALS[0]]);
    assert!(process_snapshot(&catalog, &mut state, &again).is_empty());
    assert_eq!(state.obtained_count(), 0);
    assert_eq!(state.defeated_count(), 0);
}

#[test]
fn test_boss_fires_once_on_rising_edge() {
    let catalog = catalog();
    let mut state = TrackingState::new();
    process_snapshot(&catalog, &mut state, &full_snapshot(&catalog, 0, &[]));

    let events = process_snapshot(&catalog, &mut state, &full_snapshot(&catalog, 5_000, &[GODRICK_BOSS]));
    assert_eq!(
        events,
        vec![MilestoneEvent {
            milestone: Milestone::Boss(boss_id(&catalog, GODRICK_BOSS)),
            elapsed_ms: 5_000,
        }]
    );

    // Still true, then flickers off and on again: never reported twice
    for (elapsed, set) in [(5_100, vec![GODRICK_BOSS]), (5_200, vec![]), (5_300, vec![GODRICK_BOSS])] {
        let events = process_snapshot(&catalog, &mut state, &full_snapshot(&catalog, elapsed, &set));
        assert!(events.is_empty(), "unexpected events at {elapsed}: {events:?}");
    }
    assert_eq!(state.defeated_count(), 1);
}

#[test]
fn test_bosses_reported_before_collectibles() {
    let catalog = catalog();
    let mut state = TrackingState::new();
    process_snapshot(&catalog, &mut state, &full_snapshot(&catalog, 0, &[]));

    let mut set = vec![GODRICK_RUNE, GODRICK_BOSS];
    set.extend(ordinals(1));
    let events = process_snapshot(&catalog, &mut state, &full_snapshot(&catalog, 10, &set));

    let milestones: Vec<_> = events.iter().map(|e| e.milestone).collect();
    assert_eq!(
        milestones,
        vec![
            Milestone::Boss(boss_id(&catalog, GODRICK_BOSS)),
            Milestone::Collectible(collectible_id(&catalog, GODRICK_RUNE)),
        ]
    );
}

#[test]
fn test_ordinal_surplus_deduces_unborn_rune() {
    let catalog = catalog();
    let unborn = collectible_id(&catalog, UNBORN_RUNE);
    let mut state = TrackingState::new();
    process_snapshot(&catalog, &mut state, &full_snapshot(&catalog, 0, &[]));

    // One specific rune, one ordinal: fully explained
    let mut set = vec![GODRICK_RUNE];
    set.extend(ordinals(1));
    let events = process_snapshot(&catalog, &mut state, &full_snapshot(&catalog, 100, &set));
    assert_eq!(events.len(), 1);
    assert!(!state.is_obtained(unborn));

    // Two ordinals against one specific: the surplus is the unborn rune
    let mut set = vec![GODRICK_RUNE];
    set.extend(ordinals(2));
    let events = process_snapshot(&catalog, &mut state, &full_snapshot(&catalog, 200, &set));
    assert_eq!(
        events,
        vec![MilestoneEvent {
            milestone: Milestone::Collectible(unborn),
            elapsed_ms: 200,
        }]
    );
    assert!(state.is_obtained(unborn));
}

#[test]
fn test_unborn_rune_via_own_flag() {
    let catalog = catalog();
    let unborn = collectible_id(&catalog, UNBORN_RUNE);
    let mut state = TrackingState::new();
    process_snapshot(&catalog, &mut state, &full_snapshot(&catalog, 0, &[]));

    let events = process_snapshot(&catalog, &mut state, &full_snapshot(&catalog, 50, &[UNBORN_RUNE]));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].milestone, Milestone::Collectible(unborn));
}

#[test]
fn test_deduction_seeded_true_does_not_fire() {
    let catalog = catalog();
    let mut state = TrackingState::new();
    let mut set = vec![RADAHN_RUNE];
    set.extend(ordinals(2));

    process_snapshot(&catalog, &mut state, &full_snapshot(&catalog, 0, &set));
    let events = process_snapshot(&catalog, &mut state, &full_snapshot(&catalog, 100, &set));
    assert!(events.is_empty());
}

#[test]
fn test_multi_phase_boss_collapses_to_final_phase() {
    let catalog = catalog();
    let rennala = boss_id(&catalog, RENNALA_FINAL);
    let mut state = TrackingState::new();
    process_snapshot(&catalog, &mut state, &full_snapshot(&catalog, 0, &[]));

    let events = process_snapshot(&catalog, &mut state, &full_snapshot(&catalog, 100, &[RENNALA_PHASE_1]));
    assert!(events.is_empty());

    let events = process_snapshot(
        &catalog,
        &mut state,
        &full_snapshot(&catalog, 200, &[RENNALA_PHASE_1, RENNALA_FINAL]),
    );
    assert_eq!(
        events,
        vec![MilestoneEvent {
            milestone: Milestone::Boss(rennala),
            elapsed_ms: 200,
        }]
    );
}

#[test]
fn test_omitted_flags_are_not_treated_as_false() {
    let catalog = catalog();
    let mut state = TrackingState::new();
    process_snapshot(&catalog, &mut state, &full_snapshot(&catalog, 0, &[GODRICK_BOSS]));

    // Partial snapshot without the boss flag, then the flag reappears still true
    let partial = FlagSnapshot::new(100).with_flag(RADAHN_RUNE, false);
    assert!(process_snapshot(&catalog, &mut state, &partial).is_empty());
    assert_eq!(state.previous(GODRICK_BOSS), Some(true));

    let events = process_snapshot(&catalog, &mut state, &full_snapshot(&catalog, 200, &[GODRICK_BOSS]));
    assert!(events.is_empty());
}

#[test]
fn test_flag_first_seen_after_seeding_only_seeds() {
    let catalog = catalog();
    let mut state = TrackingState::new();
    process_snapshot(&catalog, &mut state, &FlagSnapshot::new(0));

    let late = FlagSnapshot::new(100).with_flag(GODRICK_BOSS, true);
    assert!(process_snapshot(&catalog, &mut state, &late).is_empty());
}

#[test]
fn test_reset_twice_then_reseed() {
    let catalog = catalog();
    let mut state = TrackingState::new();
    let seed = full_snapshot(&catalog, 0, &[GODRICK_BOSS]);
    process_snapshot(&catalog, &mut state, &seed);
    process_snapshot(&catalog, &mut state, &full_snapshot(&catalog, 100, &[GODRICK_BOSS, RENNALA_FINAL]));
    assert_eq!(state.defeated_count(), 1);

    state.reset();
    state.reset();
    assert!(!state.is_initialized());
    assert_eq!(state.defeated_count(), 0);
    assert_eq!(state.previous(GODRICK_BOSS), None);

    assert!(process_snapshot(&catalog, &mut state, &seed).is_empty());
    assert!(state.is_initialized());
    assert!(process_snapshot(&catalog, &mut state, &seed).is_empty());
}

#[test]
fn test_reseed_keeps_reported_milestones() {
    let catalog = catalog();
    let mut state = TrackingState::new();
    process_snapshot(&catalog, &mut state, &full_snapshot(&catalog, 0, &[]));
    process_snapshot(&catalog, &mut state, &full_snapshot(&catalog, 100, &[GODRICK_BOSS]));

    state.reseed();
    // Source came back with the flag cleared and then set again
    process_snapshot(&catalog, &mut state, &full_snapshot(&catalog, 200, &[]));
    let events = process_snapshot(&catalog, &mut state, &full_snapshot(&catalog, 300, &[GODRICK_BOSS]));
    assert!(events.is_empty());
    assert_eq!(state.defeated_count(), 1);
}
