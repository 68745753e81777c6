//! Pure, deterministic logic. No I/O.

pub mod filename;
pub mod kv;
pub mod placeholders;
