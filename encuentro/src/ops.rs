//! Dictionary operations over a [`Store`].
//!
//! Each operation is a full read-modify-write of the affected word files.
//! Conditions such as a missing word or an out-of-range index are returned
//! as outcomes rather than errors so callers can report them and carry on.

use tracing::{debug, info, instrument};

use crate::core::entry::{Entry, PartOfSpeech, canonical_order};
use crate::core::relations::{RelationGraph, with_relations};
use crate::error::StoreError;
use crate::io::store::{Store, check_word_key};

/// Fields supplied when adding a new entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEntry {
    pub part_of_speech: PartOfSpeech,
    pub definition: String,
    pub long_definition: Vec<String>,
    pub examples: Vec<String>,
    pub related_words: Vec<String>,
}

/// Field updates applied by [`modify`].
///
/// Scalars replace the existing value only when non-empty; list fields are
/// appended to the existing values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryUpdate {
    pub part_of_speech: Option<PartOfSpeech>,
    pub definition: Option<String>,
    pub long_definition: Vec<String>,
    pub examples: Vec<String>,
    pub related_words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// Entries that already existed for the word before this add.
    pub existing: usize,
    /// Entries stored for the word after this add.
    pub total: usize,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted { location: String },
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModifyOutcome {
    Modified { index: usize, entry: Entry },
    /// The word has no entries; nothing was written.
    NoEntries,
    /// `index` is outside `0..len`; nothing was written.
    IndexOutOfRange { index: usize, len: usize },
}

/// A word file rewritten by [`sanitise`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub word: String,
    pub entries: usize,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitiseReport {
    pub files_read: usize,
    /// Files whose relations changed, in processing order.
    pub rewritten: Vec<Rewritten>,
}

/// Entries stored for `word`, empty if the word has no file.
pub fn lookup<S: Store + ?Sized>(store: &S, word: &str) -> Result<Vec<Entry>, StoreError> {
    Ok(store.read(word)?.unwrap_or_default())
}

/// Append a new entry for `word` and rewrite the word file in canonical order.
#[instrument(skip_all, fields(word = %word))]
pub fn add<S: Store + ?Sized>(
    store: &mut S,
    word: &str,
    fields: NewEntry,
) -> Result<AddOutcome, StoreError> {
    check_word_key(word)?;
    let entry = Entry {
        word: word.to_string(),
        part_of_speech: fields.part_of_speech,
        definition: fields.definition,
        long_definition: fields.long_definition,
        examples: fields.examples,
        related_words: fields.related_words,
    };
    let errors = store.schema().violations(&entry);
    if !errors.is_empty() {
        return Err(StoreError::Validation {
            word: word.to_string(),
            reason: errors.join("; "),
        });
    }

    let mut entries = lookup(&*store, word)?;
    let existing = entries.len();
    if existing > 0 {
        info!(existing, "entries already exist; appending new entry");
    }
    entries.push(entry);
    canonical_order(&mut entries);
    store.write(word, &entries)?;

    Ok(AddOutcome {
        existing,
        total: entries.len(),
        location: store.location(word),
    })
}

/// Words in the store, sorted, optionally filtered by prefix and by the
/// parts of speech of their entries.
pub fn list_words<S: Store + ?Sized>(
    store: &S,
    prefix: Option<&str>,
    parts_of_speech: &[PartOfSpeech],
) -> Result<Vec<String>, StoreError> {
    let mut words = store.list_keys()?;
    if let Some(prefix) = prefix.filter(|prefix| !prefix.is_empty()) {
        words.retain(|word| word.starts_with(prefix));
    }
    if parts_of_speech.is_empty() {
        return Ok(words);
    }
    let mut matching = Vec::with_capacity(words.len());
    for word in words {
        let entries = lookup(store, &word)?;
        if entries
            .iter()
            .any(|entry| parts_of_speech.contains(&entry.part_of_speech))
        {
            matching.push(word);
        }
    }
    Ok(matching)
}

/// Remove the whole word file for `word`.
#[instrument(skip_all, fields(word = %word))]
pub fn delete<S: Store + ?Sized>(store: &mut S, word: &str) -> Result<DeleteOutcome, StoreError> {
    let location = store.location(word);
    if store.delete(word)? {
        Ok(DeleteOutcome::Deleted { location })
    } else {
        debug!("no word file to delete");
        Ok(DeleteOutcome::NotFound)
    }
}

/// Update the entry at `index` in place.
///
/// Unlike [`add`], the word's entries are not re-sorted, so entries the
/// caller is not touching keep their positions.
#[instrument(skip_all, fields(word = %word, index = index))]
pub fn modify<S: Store + ?Sized>(
    store: &mut S,
    word: &str,
    index: usize,
    update: EntryUpdate,
) -> Result<ModifyOutcome, StoreError> {
    let mut entries = lookup(&*store, word)?;
    if entries.is_empty() {
        return Ok(ModifyOutcome::NoEntries);
    }
    let len = entries.len();
    let Some(entry) = entries.get_mut(index) else {
        return Ok(ModifyOutcome::IndexOutOfRange { index, len });
    };

    if let Some(part_of_speech) = update.part_of_speech.filter(|pos| !pos.is_unset()) {
        entry.part_of_speech = part_of_speech;
    }
    if let Some(definition) = update.definition.filter(|def| !def.is_empty()) {
        entry.definition = definition;
    }
    entry.long_definition.extend(update.long_definition);
    entry.examples.extend(update.examples);
    entry.related_words.extend(update.related_words);
    entry.canonicalize_in_place();
    let entry = entry.clone();

    store.write(word, &entries)?;
    Ok(ModifyOutcome::Modified { index, entry })
}

/// Recompute every word's `related_words` as the symmetric closure of all
/// declared relations across the store.
///
/// All files are read before any is written, and a file is only rewritten
/// when its entries change, so running twice leaves the store untouched the
/// second time.
#[instrument(skip_all)]
pub fn sanitise<S: Store + ?Sized>(store: &mut S) -> Result<SanitiseReport, StoreError> {
    let mut graph = RelationGraph::new();
    let mut files = Vec::new();
    for word in store.list_keys()? {
        let entries = lookup(&*store, &word)?;
        graph.add_declarations(&word, &entries);
        files.push((word, entries));
    }

    let mut report = SanitiseReport {
        files_read: files.len(),
        rewritten: Vec::new(),
    };
    for (word, entries) in files {
        let updated = with_relations(&entries, &graph.related_to(&word));
        if updated == entries {
            debug!(word, "relations unchanged");
            continue;
        }
        store.write(&word, &updated)?;
        report.rewritten.push(Rewritten {
            location: store.location(&word),
            entries: updated.len(),
            word,
        });
    }
    info!(
        files_read = report.files_read,
        rewritten = report.rewritten.len(),
        "sanitise complete"
    );
    Ok(report)
}
