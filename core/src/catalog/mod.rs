//! Milestone catalog
//!
//! The catalog is data: which collectibles and bosses exist, which flags
//! report them, and the curated labels for well-known checks. Milestones
//! are referenced by index into the catalog so a different game version
//! only needs a different TOML document.

mod definition;
mod error;
mod loader;

pub use definition::{BossDefinition, CatalogConfig, CollectibleDefinition, NamedCheck};
pub use error::CatalogError;

use hashbrown::HashSet;

/// Opaque identifier of one boolean in the game's event flag store
pub type FlagId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectibleId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BossId(pub usize);

/// The unit the tracker reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Milestone {
    Collectible(CollectibleId),
    Boss(BossId),
}

/// Validated catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    collectible_label: String,
    boss_label: String,
    collectibles: Vec<CollectibleDefinition>,
    bosses: Vec<BossDefinition>,
    ordinal_flags: Vec<FlagId>,
    named_checks: Vec<NamedCheck>,
    replacement_suffixes: Vec<String>,
    deduced: CollectibleId,
}

impl Catalog {
    pub fn from_config(config: CatalogConfig) -> Result<Self, CatalogError> {
        let deduced: Vec<usize> = config
            .collectibles
            .iter()
            .enumerate()
            .filter_map(|(idx, c)| c.deduced.then_some(idx))
            .collect();
        if deduced.len() != 1 {
            return Err(CatalogError::DeducedCount {
                count: deduced.len(),
            });
        }
        if config.bosses.is_empty() {
            return Err(CatalogError::NoBosses);
        }

        let mut seen = HashSet::new();
        let all_flags = config
            .collectibles
            .iter()
            .map(|c| c.flag)
            .chain(config.ordinal_flags.iter().copied())
            .chain(config.bosses.iter().flat_map(|b| b.phases()));
        for flag in all_flags {
            if !seen.insert(flag) {
                return Err(CatalogError::DuplicateFlag { flag });
            }
        }

        Ok(Self {
            collectible_label: config.collectible_label,
            boss_label: config.boss_label,
            collectibles: config.collectibles,
            bosses: config.bosses,
            ordinal_flags: config.ordinal_flags,
            named_checks: config.named_checks,
            replacement_suffixes: config.replacement_suffixes,
            deduced: CollectibleId(deduced[0]),
        })
    }

    // Accessor methods

    pub fn collectible(&self, id: CollectibleId) -> &CollectibleDefinition {
        &self.collectibles[id.0]
    }

    pub fn boss(&self, id: BossId) -> &BossDefinition {
        &self.bosses[id.0]
    }

    pub fn collectible_ids(&self) -> impl Iterator<Item = CollectibleId> + '_ {
        (0..self.collectibles.len()).map(CollectibleId)
    }

    pub fn boss_ids(&self) -> impl Iterator<Item = BossId> + '_ {
        (0..self.bosses.len()).map(BossId)
    }

    /// Collectibles with a trustworthy acquisition flag
    pub fn specific_collectible_ids(&self) -> impl Iterator<Item = CollectibleId> + '_ {
        let deduced = self.deduced;
        self.collectible_ids().filter(move |id| *id != deduced)
    }

    /// The collectible whose state is inferred from ordinal flags
    pub fn deduced_collectible(&self) -> CollectibleId {
        self.deduced
    }

    pub fn collectible_count(&self) -> usize {
        self.collectibles.len()
    }

    pub fn boss_count(&self) -> usize {
        self.bosses.len()
    }

    pub fn ordinal_flags(&self) -> &[FlagId] {
        &self.ordinal_flags
    }

    pub fn named_checks(&self) -> &[NamedCheck] {
        &self.named_checks
    }

    pub fn replacement_suffixes(&self) -> &[String] {
        &self.replacement_suffixes
    }

    pub fn collectible_label(&self) -> &str {
        &self.collectible_label
    }

    pub fn boss_label(&self) -> &str {
        &self.boss_label
    }

    pub fn milestone_name(&self, milestone: Milestone) -> &str {
        match milestone {
            Milestone::Collectible(id) => &self.collectible(id).name,
            Milestone::Boss(id) => &self.boss(id).name,
        }
    }

    /// Fold free text naming a collectible onto its catalog entry
    pub fn normalize_collectible(&self, text: &str) -> Option<CollectibleId> {
        let lower = text.to_lowercase();
        self.collectibles
            .iter()
            .position(|c| lower.contains(&c.match_key.to_lowercase()))
            .map(CollectibleId)
    }

    /// Every flag the state machine diffs or counts
    pub fn tracked_flags(&self) -> impl Iterator<Item = FlagId> + '_ {
        self.bosses
            .iter()
            .map(|b| b.flag)
            .chain(self.collectibles.iter().map(|c| c.flag))
            .chain(self.ordinal_flags.iter().copied())
    }
}
