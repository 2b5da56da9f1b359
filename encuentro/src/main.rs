//! Personal Spanish vocabulary dictionary.
//!
//! Stores one file per word under the words directory and offers lookup,
//! add, list, delete, modify and sanitise commands on top of it.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use encuentro::core::entry::PartOfSpeech;
use encuentro::exit_codes;
use encuentro::io::config::{EncuentroConfig, load_config};
use encuentro::io::store::{DirStore, Store};
use encuentro::logging;
use encuentro::ops::{self, DeleteOutcome, EntryUpdate, ModifyOutcome, NewEntry};

const CONFIG_DIR_NAME: &str = "espanol-encuentro";
const DEFAULT_WORDS_DIR: &str = ".espanol-encuentro/words";

#[derive(Parser)]
#[command(
    name = "encuentro",
    version,
    about = "Personal Spanish vocabulary dictionary"
)]
struct Cli {
    /// Directory containing one file per word.
    #[arg(long, global = true, env = "ENCUENTRO_WORDS_DIR")]
    words_dir: Option<PathBuf>,

    /// Config file (TOML). Missing files fall back to defaults.
    #[arg(long, global = true, env = "ENCUENTRO_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every entry stored for a word.
    Lookup {
        /// The Spanish word to look up.
        word: String,
    },
    /// Add a new entry for a word, keeping any existing entries.
    Add {
        /// The Spanish word to add an entry for.
        word: String,
        #[command(flatten)]
        fields: EntryFields,
    },
    /// List stored words.
    #[command(visible_alias = "search")]
    List {
        /// Only words starting with this prefix.
        #[arg(short, long)]
        starts_with: Option<String>,
        /// Only words with at least one entry of these parts of speech.
        #[arg(short, long, value_enum, num_args = 1..)]
        part_of_speech: Vec<PartOfSpeech>,
    },
    /// Delete a word and all of its entries.
    Delete {
        /// The Spanish word to delete.
        word: String,
    },
    /// Modify one entry of a word in place.
    Modify {
        /// The Spanish word to modify.
        word: String,
        /// Index of the entry to modify, within the word's entries.
        #[arg(short, long, default_value_t = 0)]
        index: usize,
        #[command(flatten)]
        fields: EntryFields,
    },
    /// Make related words symmetric across the whole dictionary.
    Sanitise,
}

#[derive(Args, Debug)]
struct EntryFields {
    #[arg(short, long, value_enum)]
    part_of_speech: Option<PartOfSpeech>,
    /// Short definition.
    #[arg(short, long, visible_alias = "short-definition")]
    definition: Option<String>,
    /// Longer definition, one argument per line.
    #[arg(short, long, num_args = 0..)]
    long_definition: Vec<String>,
    #[arg(short, long, num_args = 0..)]
    examples: Vec<String>,
    #[arg(short, long, num_args = 0..)]
    related_words: Vec<String>,
}

impl EntryFields {
    fn into_new_entry(self) -> NewEntry {
        NewEntry {
            part_of_speech: self.part_of_speech.unwrap_or_default(),
            definition: self.definition.unwrap_or_default(),
            long_definition: self.long_definition,
            examples: self.examples,
            related_words: self.related_words,
        }
    }

    fn into_update(self) -> EntryUpdate {
        EntryUpdate {
            part_of_speech: self.part_of_speech,
            definition: self.definition,
            long_definition: self.long_definition,
            examples: self.examples,
            related_words: self.related_words,
        }
    }
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = match config_path(cli.config) {
        Some(path) => load_config(&path)?,
        None => EncuentroConfig::default(),
    };
    let words_dir = resolve_words_dir(cli.words_dir, &config)?;
    let mut store = config.open_store(&words_dir);

    match cli.command {
        Command::Lookup { word } => cmd_lookup(&store, &word),
        Command::Add { word, fields } => cmd_add(&mut store, &word, fields),
        Command::List {
            starts_with,
            part_of_speech,
        } => cmd_list(&store, starts_with.as_deref(), &part_of_speech),
        Command::Delete { word } => cmd_delete(&mut store, &word),
        Command::Modify {
            word,
            index,
            fields,
        } => cmd_modify(&mut store, &word, index, fields),
        Command::Sanitise => cmd_sanitise(&mut store),
    }
}

/// Explicit path, else the platform config dir.
fn config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join("config.toml")))
}

/// `--words-dir`/env, else config, else `~/.espanol-encuentro/words`. Created if missing.
fn resolve_words_dir(explicit: Option<PathBuf>, config: &EncuentroConfig) -> Result<PathBuf> {
    let dir = match explicit.or_else(|| config.words_dir.clone()) {
        Some(dir) => dir,
        None => dirs::home_dir()
            .context("cannot determine home directory; pass --words-dir")?
            .join(DEFAULT_WORDS_DIR),
    };
    fs::create_dir_all(&dir).with_context(|| format!("create words dir {}", dir.display()))?;
    debug!(words_dir = %dir.display(), "resolved words directory");
    Ok(dir)
}

fn print_entries(store: &DirStore, word: &str) -> Result<bool> {
    let entries = ops::lookup(store, word)?;
    if entries.is_empty() {
        println!("No entry found for '{}'", word);
        return Ok(false);
    }
    for entry in &entries {
        let text = store
            .codec()
            .encode(std::slice::from_ref(entry))
            .context("format entry")?;
        println!("\n{}", text.trim_end());
    }
    Ok(true)
}

fn cmd_lookup(store: &DirStore, word: &str) -> Result<()> {
    print_entries(store, word)?;
    Ok(())
}

fn cmd_add(store: &mut DirStore, word: &str, fields: EntryFields) -> Result<()> {
    let outcome = ops::add(store, word, fields.into_new_entry())?;
    if outcome.existing > 0 {
        println!(
            "{} entries already exist for '{}'; appending new entry",
            outcome.existing, word
        );
    }
    println!(
        "Successfully added an entry for '{}' to {} ({} total)",
        word, outcome.location, outcome.total
    );
    Ok(())
}

fn cmd_list(store: &DirStore, starts_with: Option<&str>, parts: &[PartOfSpeech]) -> Result<()> {
    let words = ops::list_words(store, starts_with, parts)?;
    println!("Found {} words matching criteria", words.len());
    println!();
    for word in &words {
        println!("{}", word);
    }
    println!();
    Ok(())
}

fn cmd_delete(store: &mut DirStore, word: &str) -> Result<()> {
    if print_entries(store, word)? {
        println!();
    }
    match ops::delete(store, word)? {
        DeleteOutcome::Deleted { location } => {
            println!("Deleted entries for '{}' in file {}", word, location);
        }
        DeleteOutcome::NotFound => println!("Nothing to delete for '{}'", word),
    }
    Ok(())
}

fn cmd_modify(store: &mut DirStore, word: &str, index: usize, fields: EntryFields) -> Result<()> {
    match ops::modify(store, word, index, fields.into_update())? {
        ModifyOutcome::Modified { index, .. } => {
            println!(
                "Modified entry {} for '{}' in {}",
                index,
                word,
                store.location(word)
            );
        }
        ModifyOutcome::NoEntries => {
            println!("No entries found for word '{}'; nothing to modify", word);
        }
        ModifyOutcome::IndexOutOfRange { index, len } => {
            println!(
                "Cannot modify entry with index {} for word '{}' with {} entries",
                index, word, len
            );
        }
    }
    Ok(())
}

fn cmd_sanitise(store: &mut DirStore) -> Result<()> {
    let report = ops::sanitise(store)?;
    for rewritten in &report.rewritten {
        println!("Wrote {} entries to {}", rewritten.entries, rewritten.location);
    }
    println!(
        "Sanitised {} words; {} files updated",
        report.files_read,
        report.rewritten.len()
    );
    Ok(())
}
