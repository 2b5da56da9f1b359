//! Test-only helpers for constructing entries and scratch stores.

use tempfile::TempDir;

use crate::core::entry::{Entry, PartOfSpeech};
use crate::core::schema::EntrySchema;
use crate::io::codec::Format;
use crate::io::store::{DirStore, MemoryStore};
use crate::ops::NewEntry;

/// Create an entry with the given scalars and empty lists.
pub fn entry(word: &str, part_of_speech: PartOfSpeech, definition: &str) -> Entry {
    Entry {
        word: word.to_string(),
        part_of_speech,
        definition: definition.to_string(),
        ..Entry::default()
    }
}

/// Create an entry declaring `related_words`, with a placeholder definition.
pub fn related(word: &str, part_of_speech: PartOfSpeech, related_words: &[&str]) -> Entry {
    Entry {
        related_words: related_words.iter().map(|word| word.to_string()).collect(),
        ..entry(word, part_of_speech, &format!("{} definition", word))
    }
}

/// Fields for `ops::add` with only the scalars set.
pub fn new_entry(part_of_speech: PartOfSpeech, definition: &str) -> NewEntry {
    NewEntry {
        part_of_speech,
        definition: definition.to_string(),
        ..NewEntry::default()
    }
}

/// In-memory YAML store with the default schema.
pub fn memory_store() -> MemoryStore {
    MemoryStore::new(Format::Yaml, EntrySchema::default())
}

/// Directory store rooted at a fresh temp dir. Keep the `TempDir` alive.
pub fn temp_store(format: Format) -> (TempDir, DirStore) {
    let temp = tempfile::tempdir().expect("tempdir");
    let store = DirStore::new(temp.path(), format, EntrySchema::default());
    (temp, store)
}
