//! Error taxonomy for codec and store operations.
//!
//! Missing words and out-of-range indices are not errors; see the outcome
//! types in [`crate::ops`].

use std::io;
use std::path::PathBuf;

use crate::io::codec::Format;

/// Failure to turn text into entries or entries into text.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("parse {format} document: {message}")]
    Parse { format: Format, message: String },
    #[error("serialize {format} document: {message}")]
    Serialize { format: Format, message: String },
    #[error("entry {index} ('{word}'): {}", .errors.join("; "))]
    InvalidEntry {
        index: usize,
        word: String,
        errors: Vec<String>,
    },
}

/// Failure of a store operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Required input missing or a word key that cannot name a file.
    #[error("invalid entry for '{word}': {reason}")]
    Validation { word: String, reason: String },
    /// A word file exists but does not hold valid entries.
    #[error("malformed word file {location}")]
    Decode {
        location: String,
        #[source]
        source: CodecError,
    },
    #[error("encode entries for {location}")]
    Encode {
        location: String,
        #[source]
        source: CodecError,
    },
    /// Underlying filesystem failure.
    #[error("{action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
