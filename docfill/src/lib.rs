//! Render DOCX templates from `KEY=value` files.
//!
//! A run reads a KV file into a [`crate::core::kv::Context`], picks an output
//! filename, and renders the template's text parts with the context. The
//! layout follows a strict split:
//!
//! - **[`core`]**: Pure, deterministic logic (KV parsing, filename policy,
//!   placeholder repair). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (KV file loading, config, zip
//!   package rendering).
//!
//! [`generate`] coordinates the two to implement the CLI.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod generate;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
