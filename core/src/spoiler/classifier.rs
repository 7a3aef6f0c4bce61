//! Detailed-location classification
//!
//! Turns the free-text acquisition description of a placement line into a
//! short display label. Rules are tried in list order and the first match
//! wins; the first sentence of the description is the fallback.
//!
//! Named checks always sit ahead of the general extraction rules. New rules
//! are inserted at the end of their group, so adding one never changes the
//! precedence of those already present.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

use crate::catalog::NamedCheck;

/// Longest fallback label, ellipsis included
pub const FALLBACK_MAX_CHARS: usize = 50;
const ELLIPSIS: &str = "...";

fn case_insensitive(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .unwrap_or_else(|e| panic!("invalid classifier pattern {pattern:?}: {e}"))
}

static DROPPED_BY: LazyLock<Regex> = LazyLock::new(|| case_insensitive(r"\bdropped by\s+([^.]+)"));
static CHEST_UNLOCKED_BY: LazyLock<Regex> =
    LazyLock::new(|| case_insensitive(r"\bin a chest unlocked by\s+([^.]+)"));
static GIVEN_BY: LazyLock<Regex> = LazyLock::new(|| case_insensitive(r"\bgiven by\s+([^.]+)"));
static SOLD_BY: LazyLock<Regex> = LazyLock::new(|| case_insensitive(r"\bsold by\s+([^.]+)"));
static PLACE_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    case_insensitive(r"(?:^|\.\s+)(?:atop|at|in)\s+(.+?)(?:\.|\s+replaces\b|$)")
});

#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Fixed label whenever the phrase appears in the description
    NamedCheck { phrase: String, label: String },
    /// First capture group, substituted into `template` at `{}`
    Extract { pattern: Regex, template: String },
}

#[derive(Debug, Clone)]
pub struct ClassifierRule {
    pub name: String,
    pub kind: RuleKind,
}

impl ClassifierRule {
    pub fn named_check(check: &NamedCheck) -> Self {
        Self {
            name: format!("named: {}", check.phrase),
            kind: RuleKind::NamedCheck {
                phrase: check.phrase.to_lowercase(),
                label: check.label.clone(),
            },
        }
    }

    pub fn extract(name: impl Into<String>, pattern: Regex, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: RuleKind::Extract {
                pattern,
                template: template.into(),
            },
        }
    }

    pub fn is_named_check(&self) -> bool {
        matches!(self.kind, RuleKind::NamedCheck { .. })
    }

    /// Label produced by this rule alone, if it matches
    pub fn apply(&self, text: &str) -> Option<String> {
        match &self.kind {
            RuleKind::NamedCheck { phrase, label } => text
                .to_lowercase()
                .contains(phrase.as_str())
                .then(|| label.clone()),
            RuleKind::Extract { pattern, template } => {
                let captured = pattern.captures(text)?.get(1)?.as_str();
                let value = clean_extracted(captured);
                if value.is_empty() {
                    return None;
                }
                Some(template.replace("{}", value))
            }
        }
    }
}

fn clean_extracted(value: &str) -> &str {
    value.trim().trim_end_matches('.').trim_end()
}

/// The general extraction rules, in precedence order
pub fn general_rules() -> Vec<ClassifierRule> {
    vec![
        ClassifierRule::extract("dropped by", DROPPED_BY.clone(), "{}"),
        ClassifierRule::extract("chest unlocked by", CHEST_UNLOCKED_BY.clone(), "{} Chest Check"),
        ClassifierRule::extract("given by", GIVEN_BY.clone(), "{}"),
        ClassifierRule::extract("sold by", SOLD_BY.clone(), "{}"),
        ClassifierRule::extract("place clause", PLACE_CLAUSE.clone(), "{}"),
    ]
}

/// First sentence, shortened to [`FALLBACK_MAX_CHARS`]
pub fn fallback_label(text: &str) -> String {
    let sentence = text.split('.').next().unwrap_or_default().trim();
    if sentence.chars().count() <= FALLBACK_MAX_CHARS {
        return sentence.to_string();
    }
    let keep = FALLBACK_MAX_CHARS - ELLIPSIS.len();
    let mut label: String = sentence.chars().take(keep).collect();
    label.truncate(label.trim_end().len());
    label.push_str(ELLIPSIS);
    label
}

#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<ClassifierRule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            rules: general_rules(),
        }
    }
}

impl Classifier {
    pub fn new(named_checks: &[NamedCheck]) -> Self {
        let mut classifier = Self::default();
        for check in named_checks {
            classifier.add_named_check(check);
        }
        classifier
    }

    pub fn rules(&self) -> &[ClassifierRule] {
        &self.rules
    }

    /// Appended after existing named checks, ahead of every general rule
    pub fn add_named_check(&mut self, check: &NamedCheck) {
        let at = self.rules.iter().take_while(|r| r.is_named_check()).count();
        self.rules.insert(at, ClassifierRule::named_check(check));
    }

    /// Appended after every existing rule, ahead of the fallback
    pub fn add_rule(&mut self, rule: ClassifierRule) {
        self.rules.push(rule);
    }

    /// The rule that decides the label for `text`, `None` meaning the fallback
    pub fn matching_rule(&self, text: &str) -> Option<(&ClassifierRule, String)> {
        self.rules
            .iter()
            .find_map(|rule| rule.apply(text).map(|label| (rule, label)))
    }

    pub fn classify(&self, text: &str) -> String {
        match self.matching_rule(text) {
            Some((_, label)) => label,
            None => fallback_label(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(phrase: &str, label: &str) -> NamedCheck {
        NamedCheck {
            phrase: phrase.to_string(),
            label: label.to_string(),
        }
    }

    #[test]
    fn test_dropped_by() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify("Dropped by Godrick the Grafted. Replaces Godrick's Great Rune."),
            "Godrick the Grafted"
        );
    }

    #[test]
    fn test_chest_unlocked_by() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify("In a chest unlocked by Stonesword Key. Replaces Golden Seed."),
            "Stonesword Key Chest Check"
        );
    }

    #[test]
    fn test_given_by_and_sold_by() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify("Given by Blaidd after his quest."), "Blaidd after his quest");
        assert_eq!(classifier.classify("sold by Twin Maiden Husks"), "Twin Maiden Husks");
    }

    #[test]
    fn test_place_clause_stops_at_replaces() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify("Atop the Divine Bridge replaces Smithing Stone [7]"),
            "the Divine Bridge"
        );
        assert_eq!(
            classifier.classify("At the top of the Ravine. Replaces Arteria Leaf."),
            "the top of the Ravine"
        );
    }

    #[test]
    fn test_named_check_beats_general_rule() {
        let classifier = Classifier::new(&[check("Gatekeeper Gostoc", "Gostoc")]);
        let text = "Dropped by Gatekeeper Gostoc. Replaces Godrick's Great Rune.";
        assert_eq!(classifier.classify(text), "Gostoc");

        let (rule, _) = classifier.matching_rule(text).unwrap();
        assert!(rule.is_named_check());
    }

    #[test]
    fn test_named_check_is_case_insensitive() {
        let classifier = Classifier::new(&[check("Imp Seal Statue", "Imp Statue")]);
        assert_eq!(classifier.classify("behind an IMP SEAL STATUE door"), "Imp Statue");
    }

    #[test]
    fn test_added_named_checks_keep_order() {
        let mut classifier = Classifier::new(&[check("evergaol", "Evergaol Boss")]);
        classifier.add_named_check(&check("stormhill evergaol", "Stormhill"));

        assert_eq!(classifier.rules()[0].name, "named: evergaol");
        assert_eq!(classifier.rules()[1].name, "named: stormhill evergaol");
        assert_eq!(classifier.rules()[2].name, "dropped by");
        // Earlier check still wins when both match
        assert_eq!(classifier.classify("Dropped in Stormhill Evergaol"), "Evergaol Boss");
    }

    #[test]
    fn test_added_rule_runs_after_general_rules() {
        let mut classifier = Classifier::default();
        classifier.add_rule(ClassifierRule::extract(
            "found on",
            case_insensitive(r"\bfound on\s+([^.]+)"),
            "{} Corpse",
        ));
        assert_eq!(classifier.classify("Found on a hanging body."), "a hanging body Corpse");
        assert_eq!(classifier.classify("Dropped by Margit. Found on a body."), "Margit");
    }

    #[test]
    fn test_fallback_first_sentence() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify("Behind the waterfall. Replaces Somber Smithing Stone."),
            "Behind the waterfall"
        );
    }

    #[test]
    fn test_fallback_truncates_long_sentences() {
        let text = "Hidden behind an illusory wall that needs to be struck twice before it opens";
        let label = fallback_label(text);
        assert!(label.chars().count() <= FALLBACK_MAX_CHARS);
        assert!(label.ends_with("..."));
        assert!(label.starts_with("Hidden behind an illusory wall"));
    }

    #[test]
    fn test_extracted_value_is_trimmed() {
        let rule = &general_rules()[0];
        assert_eq!(rule.apply("dropped by   Margit   "), Some("Margit".to_string()));
        assert_eq!(rule.apply("dropped by ."), None);
    }
}
