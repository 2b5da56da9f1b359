//! Personal Spanish vocabulary dictionary.
//!
//! Each word is stored as one structured-text file holding that word's
//! entries. The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (entry model, canonical form,
//!   relation closure). No I/O, fully testable in isolation.
//! - **[`io`]**: Codecs, word stores and configuration. The [`io::store::Store`]
//!   trait lets operations run against a directory or an in-memory fake.
//!
//! [`ops`] coordinates both to implement the CLI commands: lookup, add,
//! list, delete, modify and sanitise.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod ops;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
