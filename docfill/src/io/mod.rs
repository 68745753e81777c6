//! I/O helpers for docfill runs.

pub mod config;
pub mod docx;
pub mod kv_file;
