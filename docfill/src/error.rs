//! Fatal error kinds and their exit codes.

use std::path::PathBuf;

use thiserror::Error;

use crate::exit_codes;

/// A failure that ends the run.
///
/// Each variant maps to its own exit code. The wrapped `anyhow::Error` carries
/// the context chain of the underlying cause.
#[derive(Debug, Error)]
pub enum DocfillError {
    #[error("template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),
    #[error("error reading kv file: {0:#}")]
    KvFile(anyhow::Error),
    #[error("error generating document: {0:#}")]
    Generation(anyhow::Error),
    #[error("invalid configuration: {0:#}")]
    Config(anyhow::Error),
}

impl DocfillError {
    pub fn exit_code(&self) -> i32 {
        match self {
            DocfillError::TemplateNotFound(_) => exit_codes::TEMPLATE_NOT_FOUND,
            DocfillError::KvFile(_) => exit_codes::KV_FILE,
            DocfillError::Generation(_) => exit_codes::GENERATION,
            DocfillError::Config(_) => exit_codes::INVALID,
        }
    }
}
