//! Stable exit codes for the docfill CLI.

/// Document generated (or `--help`/`--version` printed).
pub const OK: i32 = 0;
/// Invalid command line or configuration.
pub const INVALID: i32 = 1;
/// Template path does not exist.
pub const TEMPLATE_NOT_FOUND: i32 = 2;
/// KV file missing or unreadable.
pub const KV_FILE: i32 = 3;
/// Rendering or writing the document failed.
pub const GENERATION: i32 = 4;
