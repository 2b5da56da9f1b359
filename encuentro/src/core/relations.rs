//! Symmetric closure of the "related words" relation.
//!
//! Pure graph logic used by sanitisation: nodes are word keys, and an
//! undirected edge exists between two words if either declares the other.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::entry::Entry;

/// Undirected relation graph over word keys.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RelationGraph {
    neighbours: BTreeMap<String, BTreeSet<String>>,
}

impl RelationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an undirected edge between `a` and `b`.
    pub fn link(&mut self, a: &str, b: &str) {
        self.neighbours
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.neighbours
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
    }

    /// Record every `related_words` declaration made by the entries of `word`.
    pub fn add_declarations(&mut self, word: &str, entries: &[Entry]) {
        for entry in entries {
            for related in &entry.related_words {
                self.link(word, related);
            }
        }
    }

    /// Sorted, duplicate-free neighbours of `word` (empty if unknown).
    pub fn related_to(&self, word: &str) -> Vec<String> {
        self.neighbours
            .get(word)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// True if every edge has its mirror.
    pub fn is_symmetric(&self) -> bool {
        self.neighbours.iter().all(|(word, related)| {
            related.iter().all(|other| {
                self.neighbours
                    .get(other)
                    .is_some_and(|back| back.contains(word))
            })
        })
    }
}

/// Replace every entry's `related_words` with `related`.
///
/// Returns the new entries; the input is left untouched so callers can tell
/// whether anything changed.
pub fn with_relations(entries: &[Entry], related: &[String]) -> Vec<Entry> {
    entries
        .iter()
        .map(|entry| Entry {
            related_words: related.to_vec(),
            ..entry.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::PartOfSpeech;
    use crate::test_support::related;

    #[test]
    fn declarations_are_mirrored() {
        let mut graph = RelationGraph::new();
        graph.add_declarations(
            "comida",
            &[related("comida", PartOfSpeech::NounF, &["comer", "bebida"])],
        );
        graph.add_declarations("comer", &[related("comer", PartOfSpeech::Verb, &["beber"])]);

        assert_eq!(graph.related_to("comida"), vec!["bebida", "comer"]);
        assert_eq!(graph.related_to("bebida"), vec!["comida"]);
        assert_eq!(graph.related_to("comer"), vec!["beber", "comida"]);
        assert_eq!(graph.related_to("beber"), vec!["comer"]);
        assert!(graph.related_to("agua").is_empty());
        assert!(graph.is_symmetric());
    }

    #[test]
    fn duplicate_declarations_collapse() {
        let mut graph = RelationGraph::new();
        graph.link("sol", "luz");
        graph.link("luz", "sol");
        graph.link("sol", "luz");
        assert_eq!(graph.related_to("sol"), vec!["luz"]);
        assert_eq!(graph.related_to("luz"), vec!["sol"]);
    }

    #[test]
    fn with_relations_replaces_instead_of_appending() {
        let entries = vec![related("sol", PartOfSpeech::NounM, &["día", "zzz"])];
        let updated = with_relations(&entries, &["luz".to_string()]);
        assert_eq!(updated[0].related_words, vec!["luz"]);
        assert_eq!(entries[0].related_words, vec!["día", "zzz"]);
    }
}
