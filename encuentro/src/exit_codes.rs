//! Stable exit codes for the `encuentro` CLI.
//!
//! Missing words and out-of-range indices are reported on stdout and still
//! exit with [`OK`].

/// Command completed, including reported no-ops.
pub const OK: i32 = 0;
/// Invalid input, malformed word file, config or filesystem failure.
pub const INVALID: i32 = 1;
