//! Configurable requiredness rules for entries.
//!
//! Historical word files disagree about which fields are mandatory, so the
//! rules are data rather than hardcoded checks. `word` is always required.

use serde::{Deserialize, Serialize};

use crate::core::entry::Entry;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EntrySchema {
    /// Reject entries whose `part_of_speech` is unset.
    pub require_part_of_speech: bool,
    /// Reject entries with neither a short nor a long definition.
    pub require_definition: bool,
}

impl Default for EntrySchema {
    fn default() -> Self {
        Self {
            require_part_of_speech: false,
            require_definition: true,
        }
    }
}

impl EntrySchema {
    /// Accepts everything that has a word.
    pub fn lenient() -> Self {
        Self {
            require_part_of_speech: false,
            require_definition: false,
        }
    }

    /// Check an entry, returning every violation found.
    pub fn violations(&self, entry: &Entry) -> Vec<String> {
        let mut errors = Vec::new();
        if entry.word.trim().is_empty() {
            errors.push("word must be non-empty".to_string());
        }
        if self.require_part_of_speech && entry.part_of_speech.is_unset() {
            errors.push("part_of_speech is required".to_string());
        }
        if self.require_definition && !entry.has_definition() {
            errors.push("definition or long_definition is required".to_string());
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::PartOfSpeech;
    use crate::test_support::entry;

    #[test]
    fn default_schema_requires_definition_only() {
        let schema = EntrySchema::default();
        assert!(schema.violations(&entry("sal", PartOfSpeech::Unset, "salt")).is_empty());

        let errors = schema.violations(&Entry::new("sal"));
        assert_eq!(errors, vec!["definition or long_definition is required"]);
    }

    #[test]
    fn strict_schema_reports_all_violations() {
        let schema = EntrySchema {
            require_part_of_speech: true,
            require_definition: true,
        };
        let errors = schema.violations(&Entry::new(" "));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn lenient_schema_still_requires_word() {
        let schema = EntrySchema::lenient();
        assert!(schema.violations(&Entry::new("luz")).is_empty());
        assert_eq!(schema.violations(&Entry::new("")).len(), 1);
    }
}
