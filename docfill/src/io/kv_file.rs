//! Loading the KV file that supplies template values.

use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result, bail};
use tracing::{debug, warn};

use crate::core::kv::{Context, parse_kv};

/// Read and parse a KV file.
///
/// Skipped lines and overwritten duplicate keys are reported as warnings; an
/// empty result is allowed but warned about.
pub fn load_context(path: &Path) -> Result<Context> {
    if !path.exists() {
        bail!("kv file not found: {}", path.display());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let parsed = parse_kv(&contents);

    for skipped in &parsed.skipped {
        warn!("skipping invalid line {}: {}", skipped.lineno, skipped.line);
    }
    for dup in &parsed.duplicates {
        warn!(
            "duplicate key {} on line {} overrides line {}",
            dup.key, dup.lineno, dup.previous_lineno
        );
    }
    if parsed.context.is_empty() {
        warn!("no key/value pairs found in kv file");
    }
    debug!(path = %path.display(), keys = parsed.context.len(), "kv file loaded");

    Ok(parsed.context)
}
