//! Lookup tables built from one spoiler document

use hashbrown::HashMap;
use std::path::{Path, PathBuf};

use crate::catalog::{BossId, Catalog, CollectibleId, FlagId};

/// Returned when a collectible has no known placement
pub const UNKNOWN_LOCATION: &str = "Unknown location";
/// Stands in for a boss slot with no known replacement
pub const UNKNOWN_IDENTITY: &str = "Unknown";

/// Where a collectible was placed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    pub area: String,
    /// Classified label from a detailed placement line, empty for hints
    pub detail: String,
    /// Came from a detailed line; later lines for the collectible are ignored
    pub detailed: bool,
}

/// Immutable once built; a reload builds a new index.
#[derive(Debug, Clone, Default)]
pub struct SpoilerIndex {
    pub(super) locations: HashMap<CollectibleId, Placement>,
    pub(super) replacements: HashMap<FlagId, String>,
    pub(super) seed: Option<String>,
    pub(super) source: Option<PathBuf>,
}

impl SpoilerIndex {
    /// Index with nothing in it, used before any document is loaded
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn placement(&self, id: CollectibleId) -> Option<&Placement> {
        self.locations.get(&id)
    }

    /// Detail if known, else area, else [`UNKNOWN_LOCATION`]
    pub fn get_location(&self, id: CollectibleId) -> &str {
        match self.locations.get(&id) {
            Some(p) if !p.detail.is_empty() => &p.detail,
            Some(p) if !p.area.is_empty() => &p.area,
            _ => UNKNOWN_LOCATION,
        }
    }

    /// Identity now occupying the boss slot behind `flag`
    pub fn replacement(&self, flag: FlagId) -> Option<&str> {
        self.replacements.get(&flag).map(String::as_str)
    }

    /// Display label for a defeated boss. Multi-phase bosses list every
    /// phase's replacement, e.g. `A (Phase 1) B (Phase 2)`.
    pub fn boss_label(&self, catalog: &Catalog, id: BossId) -> String {
        let boss = catalog.boss(id);
        if !boss.is_multi_phase() {
            return self
                .replacement(boss.flag)
                .unwrap_or(UNKNOWN_IDENTITY)
                .to_string();
        }

        boss.phases()
            .enumerate()
            .map(|(idx, flag)| {
                format!(
                    "{} (Phase {})",
                    self.replacement(flag).unwrap_or(UNKNOWN_IDENTITY),
                    idx + 1
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn seed(&self) -> Option<&str> {
        self.seed.as_deref()
    }

    /// Document this index was built from
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    pub fn replacement_count(&self) -> usize {
        self.replacements.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rennala(catalog: &Catalog) -> BossId {
        catalog
            .boss_ids()
            .find(|id| catalog.boss(*id).name.starts_with("Rennala"))
            .unwrap()
    }

    #[test]
    fn test_location_falls_back_to_area_then_sentinel() {
        let mut index = SpoilerIndex::empty();
        index.locations.insert(
            CollectibleId(0),
            Placement {
                area: "Liurnia".to_string(),
                detail: String::new(),
                detailed: false,
            },
        );
        assert_eq!(index.get_location(CollectibleId(0)), "Liurnia");
        assert_eq!(index.get_location(CollectibleId(1)), UNKNOWN_LOCATION);
    }

    #[test]
    fn test_multi_phase_label_substitutes_unknown() {
        let catalog = Catalog::bundled().unwrap();
        let id = rennala(&catalog);
        let mut index = SpoilerIndex::empty();
        index.replacements.insert(14000800, "Mohg, Lord of Blood".to_string());

        assert_eq!(
            index.boss_label(&catalog, id),
            "Unknown (Phase 1) Mohg, Lord of Blood (Phase 2)"
        );
    }

    #[test]
    fn test_single_phase_label() {
        let catalog = Catalog::bundled().unwrap();
        let mut index = SpoilerIndex::empty();
        assert_eq!(index.boss_label(&catalog, BossId(0)), UNKNOWN_IDENTITY);

        index.replacements.insert(catalog.boss(BossId(0)).flag, "Fire Giant".to_string());
        assert_eq!(index.boss_label(&catalog, BossId(0)), "Fire Giant");
    }
}
