//! Deterministic, pure logic for dictionary entries.
//!
//! Core modules are free of I/O side effects. They operate on in-memory
//! entries and return deterministic outputs suitable for tests.

pub mod entry;
pub mod relations;
pub mod schema;
