//! Pluggable text codecs for word files.
//!
//! Every codec obeys the same contract: fields holding their zero value are
//! omitted on encode and restored on decode, non-ASCII text is written
//! literally, and `decode(encode(entries)) == entries`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::entry::Entry;
use crate::core::schema::EntrySchema;
use crate::error::CodecError;

/// Serialization format of a word file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
        }
    }

    pub fn codec(self) -> Box<dyn Codec> {
        match self {
            Format::Yaml => Box::new(YamlCodec),
            Format::Json => Box::new(JsonCodec),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Encode/decode capability pair for a sequence of entries.
pub trait Codec {
    fn format(&self) -> Format;

    /// Serialize entries in the order given.
    fn encode(&self, entries: &[Entry]) -> Result<String, CodecError>;

    /// Parse a document holding zero or more entry records.
    fn decode(&self, text: &str) -> Result<Vec<Entry>, CodecError>;

    fn extension(&self) -> &'static str {
        self.format().extension()
    }
}

/// Block-style YAML, UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn encode(&self, entries: &[Entry]) -> Result<String, CodecError> {
        serde_yaml::to_string(entries).map_err(|err| CodecError::Serialize {
            format: Format::Yaml,
            message: err.to_string(),
        })
    }

    fn decode(&self, text: &str) -> Result<Vec<Entry>, CodecError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_yaml::from_str(text).map_err(|err| CodecError::Parse {
            format: Format::Yaml,
            message: err.to_string(),
        })
    }
}

/// Pretty-printed JSON with a trailing newline, UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn encode(&self, entries: &[Entry]) -> Result<String, CodecError> {
        let mut buf =
            serde_json::to_string_pretty(entries).map_err(|err| CodecError::Serialize {
                format: Format::Json,
                message: err.to_string(),
            })?;
        buf.push('\n');
        Ok(buf)
    }

    fn decode(&self, text: &str) -> Result<Vec<Entry>, CodecError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(text).map_err(|err| CodecError::Parse {
            format: Format::Json,
            message: err.to_string(),
        })
    }
}

/// Decode and reject entries that violate `schema`.
pub fn decode_checked(
    codec: &dyn Codec,
    text: &str,
    schema: &EntrySchema,
) -> Result<Vec<Entry>, CodecError> {
    let entries = codec.decode(text)?;
    for (index, entry) in entries.iter().enumerate() {
        let errors = schema.violations(entry);
        if !errors.is_empty() {
            return Err(CodecError::InvalidEntry {
                index,
                word: entry.word.clone(),
                errors,
            });
        }
    }
    Ok(entries)
}
