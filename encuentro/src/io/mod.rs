//! I/O helpers: codecs, word stores, and configuration.

pub mod codec;
pub mod config;
pub mod store;
