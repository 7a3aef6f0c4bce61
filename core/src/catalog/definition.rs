//! Serde types for catalog TOML documents

use serde::{Deserialize, Serialize};

use super::FlagId;

fn default_collectible_label() -> String {
    "Collectibles".to_string()
}

fn default_boss_label() -> String {
    "Bosses".to_string()
}

/// Root of a catalog document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Heading used for collectibles in the progress summary
    #[serde(default = "default_collectible_label")]
    pub collectible_label: String,
    /// Heading used for bosses in the progress summary
    #[serde(default = "default_boss_label")]
    pub boss_label: String,
    /// Count-style flags: the n-th one is set when the n-th collectible is picked up
    #[serde(default)]
    pub ordinal_flags: Vec<FlagId>,
    /// Literal suffixes stripped from replacement boss names
    #[serde(default)]
    pub replacement_suffixes: Vec<String>,
    #[serde(default, rename = "collectible")]
    pub collectibles: Vec<CollectibleDefinition>,
    #[serde(default, rename = "boss")]
    pub bosses: Vec<BossDefinition>,
    #[serde(default, rename = "named_check")]
    pub named_checks: Vec<NamedCheck>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectibleDefinition {
    pub name: String,
    /// Lowercase substring that identifies this collectible in free text
    pub match_key: String,
    pub flag: FlagId,
    /// Acquisition flag is unreliable; obtained state is inferred from ordinal flags
    #[serde(default)]
    pub deduced: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossDefinition {
    pub name: String,
    /// Final-phase flag, the only one that marks the boss defeated
    pub flag: FlagId,
    /// Earlier-phase flags in fight order
    #[serde(default)]
    pub phase_flags: Vec<FlagId>,
}

impl BossDefinition {
    pub fn is_multi_phase(&self) -> bool {
        !self.phase_flags.is_empty()
    }

    /// All phase flags in fight order, final phase last
    pub fn phases(&self) -> impl Iterator<Item = FlagId> + '_ {
        self.phase_flags.iter().copied().chain(std::iter::once(self.flag))
    }
}

/// Fixed label for a well-known check, keyed by a phrase in the acquisition text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedCheck {
    pub phrase: String,
    pub label: String,
}
