//! Output filename policy.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::kv::Context;

/// Default maximum length (in characters) of a sanitized filename stem.
pub const DEFAULT_MAX_FILENAME_LEN: usize = 120;

/// Keys consulted, in order, when deriving the output filename.
pub const DEFAULT_NAME_KEYS: [&str; 5] = ["FIRSTNAME", "name", "Name", "FULLNAME", "FULL_NAME"];

/// Stem used when the sanitized value is empty.
const EMPTY_STEM: &str = "output";
/// Filename used when no name key is present.
const FALLBACK_FILENAME: &str = "document.docx";

static UNSAFE_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Reduce arbitrary text to a filename stem.
///
/// Keeps Unicode word characters, whitespace and `-`; whitespace runs become
/// `_`; the result is cut to `max_len` characters. Falls back to `"output"`.
pub fn safe_filename(value: Option<&str>, max_len: usize) -> String {
    let value = value.unwrap_or_default().trim();
    let cleaned = UNSAFE_CHARS.replace_all(value, "");
    let joined = WHITESPACE_RUN.replace_all(&cleaned, "_");
    let truncated: String = joined.chars().take(max_len).collect();
    if truncated.is_empty() {
        return EMPTY_STEM.to_string();
    }
    truncated
}

/// Pick the output filename for a run.
///
/// An explicit name is used verbatim. Otherwise the first key in `name_keys`
/// with a non-empty value is sanitized and given a `.docx` extension.
pub fn output_filename<S: AsRef<str>>(
    explicit: Option<&str>,
    context: &Context,
    name_keys: &[S],
    max_len: usize,
) -> String {
    if let Some(name) = explicit.filter(|name| !name.is_empty()) {
        return name.to_string();
    }
    let candidate = name_keys
        .iter()
        .filter_map(|key| context.get(key.as_ref()))
        .find(|value| !value.is_empty());
    match candidate {
        Some(value) => format!("{}.docx", safe_filename(Some(value), max_len)),
        None => FALLBACK_FILENAME.to_string(),
    }
}
