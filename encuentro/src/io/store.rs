//! Word stores: one document of entries per word key.
//!
//! [`DirStore`] keeps each word in `<root>/<word>.<ext>`. [`MemoryStore`]
//! holds the same encoded documents in memory so store-level logic can be
//! exercised without touching the filesystem. Both canonicalize entries on
//! write and validate them against the configured schema on read.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::entry::Entry;
use crate::core::schema::EntrySchema;
use crate::error::StoreError;
use crate::io::codec::{Codec, Format, decode_checked};

/// Storage capability used by dictionary operations.
pub trait Store {
    /// Entries stored for `word`, or `None` if the word has no file.
    fn read(&self, word: &str) -> Result<Option<Vec<Entry>>, StoreError>;

    /// Replace the whole document for `word`. Entry order is kept as given.
    fn write(&mut self, word: &str, entries: &[Entry]) -> Result<(), StoreError>;

    /// Remove the document for `word`. Returns whether one existed.
    fn delete(&mut self, word: &str) -> Result<bool, StoreError>;

    /// Every stored word key, sorted ascending.
    fn list_keys(&self) -> Result<Vec<String>, StoreError>;

    /// Human-readable location of the document for `word`.
    fn location(&self, word: &str) -> String;

    fn schema(&self) -> &EntrySchema;
}

/// Reject keys that cannot name exactly one file inside the store root.
pub fn check_word_key(word: &str) -> Result<(), StoreError> {
    let reason = if word.trim().is_empty() {
        Some("word must be non-empty")
    } else if word.contains(['/', '\\']) {
        Some("word must not contain path separators")
    } else if word == "." || word == ".." {
        Some("word must not be a relative directory name")
    } else if word.contains('\0') {
        Some("word must not contain NUL")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(StoreError::Validation {
            word: word.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

fn encode_canonical(
    codec: &dyn Codec,
    location: &str,
    entries: &[Entry],
) -> Result<String, StoreError> {
    let canonical: Vec<Entry> = entries.iter().map(Entry::canonicalize).collect();
    codec
        .encode(&canonical)
        .map_err(|source| StoreError::Encode {
            location: location.to_string(),
            source,
        })
}

/// Directory of `<word>.<ext>` files.
pub struct DirStore {
    root: PathBuf,
    codec: Box<dyn Codec>,
    schema: EntrySchema,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>, format: Format, schema: EntrySchema) -> Self {
        Self {
            root: root.into(),
            codec: format.codec(),
            schema,
        }
    }

    pub fn codec(&self) -> &dyn Codec {
        self.codec.as_ref()
    }

    /// Path of the file holding `word`.
    pub fn path_for(&self, word: &str) -> PathBuf {
        self.root.join(format!("{}.{}", word, self.codec.extension()))
    }
}

impl Store for DirStore {
    fn read(&self, word: &str) -> Result<Option<Vec<Entry>>, StoreError> {
        check_word_key(word)?;
        let path = self.path_for(word);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(word, path = %path.display(), "no word file");
                return Ok(None);
            }
            Err(err) => return Err(StoreError::io("read", &path, err)),
        };
        let entries = decode_checked(self.codec.as_ref(), &contents, &self.schema).map_err(
            |source| StoreError::Decode {
                location: path.display().to_string(),
                source,
            },
        )?;
        debug!(count = entries.len(), path = %path.display(), "read entries");
        Ok(Some(entries))
    }

    fn write(&mut self, word: &str, entries: &[Entry]) -> Result<(), StoreError> {
        check_word_key(word)?;
        let path = self.path_for(word);
        let contents = encode_canonical(self.codec.as_ref(), &path.display().to_string(), entries)?;
        write_atomic(&path, &contents)?;
        info!(count = entries.len(), path = %path.display(), "wrote entries");
        Ok(())
    }

    fn delete(&mut self, word: &str) -> Result<bool, StoreError> {
        check_word_key(word)?;
        let path = self.path_for(word);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(word, path = %path.display(), "deleted word file");
                Ok(true)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(StoreError::io("delete", &path, err)),
        }
    }

    fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        let dir = match fs::read_dir(&self.root) {
            Ok(dir) => dir,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::io("list", &self.root, err)),
        };
        let extension = self.codec.extension();
        let mut keys = Vec::new();
        for item in dir {
            let item = item.map_err(|err| StoreError::io("list", &self.root, err))?;
            let path = item.path();
            if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some(extension)
            {
                continue;
            }
            match path.file_stem().and_then(|stem| stem.to_str()) {
                Some(stem) if check_word_key(stem).is_ok() => keys.push(stem.to_string()),
                Some(_) => warn!(path = %path.display(), "skipping file that cannot name a word"),
                None => warn!(path = %path.display(), "skipping word file with non UTF-8 name"),
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn location(&self, word: &str) -> String {
        self.path_for(word).display().to_string()
    }

    fn schema(&self) -> &EntrySchema {
        &self.schema
    }
}

/// Replace `path` by writing a sibling temp file and renaming it over.
fn write_atomic(path: &Path, contents: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| StoreError::io("create directory", parent, err))?;
    }
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);
    fs::write(&tmp_path, contents).map_err(|err| StoreError::io("write temp", &tmp_path, err))?;
    fs::rename(&tmp_path, path).map_err(|err| StoreError::io("replace", path, err))
}

/// In-memory store of encoded documents.
pub struct MemoryStore {
    codec: Box<dyn Codec>,
    schema: EntrySchema,
    documents: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new(format: Format, schema: EntrySchema) -> Self {
        Self {
            codec: format.codec(),
            schema,
            documents: BTreeMap::new(),
            writes: 0,
        }
    }

    /// Raw encoded document for `word`.
    pub fn document(&self, word: &str) -> Option<&str> {
        self.documents.get(word).map(String::as_str)
    }

    /// Insert a raw document without canonicalizing or counting a write.
    pub fn insert_document(&mut self, word: &str, text: impl Into<String>) {
        self.documents.insert(word.to_string(), text.into());
    }

    /// Number of documents written through [`Store::write`].
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Store for MemoryStore {
    fn read(&self, word: &str) -> Result<Option<Vec<Entry>>, StoreError> {
        check_word_key(word)?;
        let Some(text) = self.documents.get(word) else {
            return Ok(None);
        };
        decode_checked(self.codec.as_ref(), text, &self.schema)
            .map(Some)
            .map_err(|source| StoreError::Decode {
                location: self.location(word),
                source,
            })
    }

    fn write(&mut self, word: &str, entries: &[Entry]) -> Result<(), StoreError> {
        check_word_key(word)?;
        let text = encode_canonical(self.codec.as_ref(), &self.location(word), entries)?;
        self.documents.insert(word.to_string(), text);
        self.writes += 1;
        Ok(())
    }

    fn delete(&mut self, word: &str) -> Result<bool, StoreError> {
        check_word_key(word)?;
        Ok(self.documents.remove(word).is_some())
    }

    fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn location(&self, word: &str) -> String {
        format!("memory:{}.{}", word, self.codec.extension())
    }

    fn schema(&self) -> &EntrySchema {
        &self.schema
    }
}
