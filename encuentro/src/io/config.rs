//! Dictionary configuration stored as TOML.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::schema::EntrySchema;
use crate::io::codec::Format;
use crate::io::store::DirStore;

/// Dictionary configuration (TOML).
///
/// Intended to be edited by hand. Missing fields default to the YAML codec
/// and a schema that only insists on a definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct EncuentroConfig {
    /// Codec used for word files.
    pub format: Format,

    /// Storage root used when neither `--words-dir` nor the environment
    /// names one.
    pub words_dir: Option<PathBuf>,

    pub schema: EntrySchema,
}

impl EncuentroConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.words_dir {
            if dir.as_os_str().is_empty() {
                return Err(anyhow!("words_dir must not be empty when set"));
            }
        }
        Ok(())
    }

    /// Open the word store rooted at `root` with this configuration.
    pub fn open_store(&self, root: impl Into<PathBuf>) -> DirStore {
        DirStore::new(root, self.format, self.schema)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `EncuentroConfig::default()`.
pub fn load_config(path: &Path) -> Result<EncuentroConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(EncuentroConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: EncuentroConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    debug!(path = %path.display(), format = %cfg.format, "config loaded");
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &EncuentroConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
