use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use super::{Classifier, Placement, SpoilerError, SpoilerIndex, discovery};
use crate::catalog::{Catalog, CollectibleId, FlagId};


// "<Collectible> in <Area>: <acquisition text>"
static DETAILED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<item>[^:]+?) in (?P<area>[^:]+?):\s*(?P<text>.+)$")
        .unwrap_or_else(|e| panic!("invalid detailed line pattern: {e}"))
});
// "<Collectible>: [In ]<Area>"
static HINT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<item>[^:]+):\s*(?:(?i:in)\s+)?(?P<area>.+?)\s*$")
        .unwrap_or_else(|e| panic!("invalid hint line pattern: {e}"))
});
// "Replacing <Boss> (#<flag>) in <Area>: <Replacement> (#<flag>) from <Source>"
static BOSS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^Replacing (?P<original>.+?) \(#(?P<flag>\d+)\) in (?P<area>.+?): (?P<replacement>.+?) \(#(?P<other>\d+)\) from (?P<source>.+)$",
    )
    .unwrap_or_else(|e| panic!("invalid boss line pattern: {e}"))
});
static SEED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bseed\s*[:=]\s*(?P<seed>\d+)")
        .unwrap_or_else(|e| panic!("invalid seed line pattern: {e}"))
});

/// One recognised spoiler line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpoilerLine {
    Detailed {
        collectible: CollectibleId,
        area: String,
        detail: String,
    },
    Hint {
        collectible: CollectibleId,
        area: String,
    },
    BossReplacement {
        flag: FlagId,
        replacement: String,
    },
    Seed(String),
    Ignored,
}

pub struct SpoilerParser<'a> {
    catalog: &'a Catalog,
    classifier: &'a Classifier,
}

impl<'a> SpoilerParser<'a> {
    pub fn new(catalog: &'a Catalog, classifier: &'a Classifier) -> Self {
        Self {
            catalog,
            classifier,
        }
    }

    /// Read and index a spoiler document. Only an unreadable file fails;
    /// lines that match no grammar are skipped.
    pub fn load(&self, path: &Path) -> Result<SpoilerIndex, SpoilerError> {
        let bytes = fs::read(path).map_err(|source| SpoilerError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);

        let mut index = self.parse_str(&content);
        if index.seed.is_none() {
            index.seed = discovery::seed_from_filename(path);
        }
        index.source = Some(path.to_path_buf());

        tracing::info!(
            path = %path.display(),
            locations = index.location_count(),
            replacements = index.replacement_count(),
            seed = index.seed.as_deref().unwrap_or("unknown"),
            "Loaded spoiler document"
        );
        Ok(index)
    }

    pub fn parse_str(&self, content: &str) -> SpoilerIndex {
        self.parse_lines(content.lines())
    }

    pub fn parse_lines<'l>(&self, lines: impl IntoIterator<Item = &'l str>) -> SpoilerIndex {
        let mut index = SpoilerIndex::empty();
        for line in lines {
            let parsed = self.parse_line(line);
            apply_line(&mut index, parsed);
        }
        index
    }

    /// Match one line against the grammars in priority order
    pub fn parse_line(&self, line: &str) -> SpoilerLine {
        let line = line.trim();
        if line.is_empty() {
            return SpoilerLine::Ignored;
        }

        if let Some(caps) = DETAILED_LINE.captures(line)
            && let Some(collectible) = self.catalog.normalize_collectible(&caps["item"])
        {
            return SpoilerLine::Detailed {
                collectible,
                area: caps["area"].trim().to_string(),
                detail: self.classifier.classify(&caps["text"]),
            };
        }

        if let Some(caps) = HINT_LINE.captures(line)
            && let Some(collectible) = self.catalog.normalize_collectible(&caps["item"])
        {
            return SpoilerLine::Hint {
                collectible,
                area: caps["area"].to_string(),
            };
        }

        if let Some(caps) = BOSS_LINE.captures(line)
            && let Ok(flag) = caps["flag"].parse::<FlagId>()
        {
            return SpoilerLine::BossReplacement {
                flag,
                replacement: self.strip_suffixes(&caps["replacement"]),
            };
        }

        if let Some(caps) = SEED_LINE.captures(line) {
            return SpoilerLine::Seed(caps["seed"].to_string());
        }

        SpoilerLine::Ignored
    }

    fn strip_suffixes(&self, name: &str) -> String {
        let mut name = name.trim();
        for suffix in self.catalog.replacement_suffixes() {
            if let Some(stripped) = name.strip_suffix(suffix.as_str()) {
                name = stripped.trim_end();
            }
        }
        name.to_string()
    }
}

fn apply_line(index: &mut SpoilerIndex, line: SpoilerLine) {
    match line {
        SpoilerLine::Detailed {
            collectible,
            area,
            detail,
        } => {
            let entry = index.locations.entry(collectible).or_default();
            // First detailed line wins; hints never block one
            if !entry.detailed {
                *entry = Placement {
                    area,
                    detail,
                    detailed: true,
                };
            }
        }
        SpoilerLine::Hint { collectible, area } => {
            index
                .locations
                .entry(collectible)
                .or_insert(Placement {
                    area,
                    detail: String::new(),
                    detailed: false,
                });
        }
        SpoilerLine::BossReplacement { flag, replacement } => {
            index.replacements.insert(flag, replacement);
        }
        SpoilerLine::Seed(seed) => {
            index.seed.get_or_insert(seed);
        }
        SpoilerLine::Ignored => {}
    }
}
