//! Spoiler documents
//!
//! A spoiler document is free-form text written by the randomizer. Three
//! line shapes are recognised (detailed placements, placement hints and boss
//! replacements); everything else is skipped.

mod classifier;
mod discovery;
mod error;
mod index;
mod parser;

pub use classifier::{
    Classifier, ClassifierRule, FALLBACK_MAX_CHARS, RuleKind, fallback_label, general_rules,
};
pub use discovery::{
    find_spoiler, is_spoiler_document, newest_document, same_document, seed_from_filename,
};
pub use error::SpoilerError;
pub use index::{Placement, SpoilerIndex, UNKNOWN_IDENTITY, UNKNOWN_LOCATION};
pub use parser::{SpoilerLine, SpoilerParser};
