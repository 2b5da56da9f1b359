//! The dictionary entry record and its canonical form.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Grammatical category of an entry.
///
/// Variants are declared in the lexicographic order of their serialized
/// names so the derived `Ord` matches textual ordering.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
pub enum PartOfSpeech {
    /// No category recorded. Serialized as the empty string.
    #[default]
    #[serde(rename = "")]
    #[value(skip)]
    Unset,
    #[serde(rename = "adjective")]
    #[value(name = "adjective")]
    Adjective,
    #[serde(rename = "noun_f")]
    #[value(name = "noun_f")]
    NounF,
    #[serde(rename = "noun_m")]
    #[value(name = "noun_m")]
    NounM,
    #[serde(rename = "verb")]
    #[value(name = "verb")]
    Verb,
}

impl PartOfSpeech {
    pub fn as_str(self) -> &'static str {
        match self {
            PartOfSpeech::Unset => "",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::NounF => "noun_f",
            PartOfSpeech::NounM => "noun_m",
            PartOfSpeech::Verb => "verb",
        }
    }

    pub fn is_unset(&self) -> bool {
        *self == PartOfSpeech::Unset
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartOfSpeech {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(PartOfSpeech::Unset),
            "adjective" => Ok(PartOfSpeech::Adjective),
            "noun_f" => Ok(PartOfSpeech::NounF),
            "noun_m" => Ok(PartOfSpeech::NounM),
            "verb" => Ok(PartOfSpeech::Verb),
            other => Err(format!(
                "unknown part of speech '{other}' (expected noun_f, noun_m, verb or adjective)"
            )),
        }
    }
}

/// One sense of a word.
///
/// Fields holding their zero value are omitted when serialized and restored
/// as the zero value when absent, which keeps word files minimal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub word: String,
    #[serde(default, skip_serializing_if = "PartOfSpeech::is_unset")]
    pub part_of_speech: PartOfSpeech,
    #[serde(
        default,
        alias = "short_definition",
        skip_serializing_if = "String::is_empty"
    )]
    pub definition: String,
    /// Supplementary definition lines, kept in the order given.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub long_definition: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_words: Vec<String>,
}

impl Entry {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Self::default()
        }
    }

    /// True if either the short or the long definition carries text.
    pub fn has_definition(&self) -> bool {
        !self.definition.trim().is_empty()
            || self.long_definition.iter().any(|line| !line.trim().is_empty())
    }

    /// Copy with `examples` and `related_words` sorted and deduplicated.
    pub fn canonicalize(&self) -> Entry {
        let mut entry = self.clone();
        entry.canonicalize_in_place();
        entry
    }

    pub fn canonicalize_in_place(&mut self) {
        sort_dedup(&mut self.examples);
        sort_dedup(&mut self.related_words);
    }

    /// Ordering used for the on-disk order of a word's entries.
    pub fn sort_key_cmp(&self, other: &Entry) -> Ordering {
        (&self.word, self.part_of_speech, &self.definition).cmp(&(
            &other.word,
            other.part_of_speech,
            &other.definition,
        ))
    }
}

fn sort_dedup(values: &mut Vec<String>) {
    values.sort();
    values.dedup();
}

/// Canonicalize every entry and order them by `(word, part_of_speech, definition)`.
///
/// The sort is stable, so entries sharing a key keep their relative order.
pub fn canonical_order(entries: &mut [Entry]) {
    for entry in entries.iter_mut() {
        entry.canonicalize_in_place();
    }
    entries.sort_by(Entry::sort_key_cmp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::entry;
    use proptest::prelude::*;

    #[test]
    fn canonicalize_sorts_and_dedups_lists() {
        let mut raw = entry("comer", PartOfSpeech::Verb, "to eat");
        raw.examples = vec!["b".into(), "a".into(), "b".into()];
        raw.related_words = vec!["comida".into(), "beber".into(), "comida".into()];
        raw.long_definition = vec!["second".into(), "first".into()];

        let canonical = raw.canonicalize();
        assert_eq!(canonical.examples, vec!["a", "b"]);
        assert_eq!(canonical.related_words, vec!["beber", "comida"]);
        assert_eq!(canonical.long_definition, vec!["second", "first"]);
        // Source entry is untouched.
        assert_eq!(raw.examples, vec!["b", "a", "b"]);
    }

    #[test]
    fn part_of_speech_order_matches_text() {
        let mut all = vec![
            PartOfSpeech::Verb,
            PartOfSpeech::NounM,
            PartOfSpeech::Unset,
            PartOfSpeech::NounF,
            PartOfSpeech::Adjective,
        ];
        all.sort();
        let names: Vec<&str> = all.iter().map(|pos| pos.as_str()).collect();
        let mut sorted_names = names.clone();
        sorted_names.sort();
        assert_eq!(names, sorted_names);
    }

    #[test]
    fn part_of_speech_parses_known_names() {
        assert_eq!("noun_f".parse::<PartOfSpeech>(), Ok(PartOfSpeech::NounF));
        assert_eq!("".parse::<PartOfSpeech>(), Ok(PartOfSpeech::Unset));
        assert!("adverb".parse::<PartOfSpeech>().is_err());
    }

    #[test]
    fn canonical_order_sorts_by_word_pos_definition() {
        let mut entries = vec![
            entry("banco", PartOfSpeech::NounM, "bench"),
            entry("banco", PartOfSpeech::NounM, "bank"),
            entry("banco", PartOfSpeech::Unset, "zzz"),
        ];
        canonical_order(&mut entries);
        let definitions: Vec<&str> = entries.iter().map(|e| e.definition.as_str()).collect();
        assert_eq!(definitions, vec!["zzz", "bank", "bench"]);
    }

    #[test]
    fn has_definition_accepts_long_definition_only() {
        let mut entry = Entry::new("año");
        assert!(!entry.has_definition());
        entry.long_definition = vec!["year".into()];
        assert!(entry.has_definition());
    }

    proptest! {
        #[test]
        fn canonicalize_is_idempotent(
            examples in proptest::collection::vec("[a-cñá ]{0,4}", 0..6),
            related in proptest::collection::vec("[a-cñ]{1,3}", 0..6),
        ) {
            let mut raw = Entry::new("niño");
            raw.examples = examples;
            raw.related_words = related;
            let once = raw.canonicalize();
            prop_assert_eq!(once.canonicalize(), once);
        }
    }
}
