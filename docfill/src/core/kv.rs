//! Parsing of `KEY=value` text into a render context.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// `\r\n`, `\n` or a lone `\r`.
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n|\r|\n").unwrap());

/// Mapping from placeholder key to substituted value.
pub type Context = BTreeMap<String, String>;

/// A non-blank, non-comment line without `=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub lineno: usize,
    pub line: String,
}

/// A key that appeared more than once; the later value replaced the earlier one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey {
    pub key: String,
    pub previous_lineno: usize,
    pub lineno: usize,
}

/// Outcome of parsing a KV document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KvParse {
    pub context: Context,
    pub skipped: Vec<SkippedLine>,
    pub duplicates: Vec<DuplicateKey>,
}

/// Parse `KEY=value` lines.
///
/// Blank lines and `#` comments are ignored. Lines without `=` are collected in
/// [`KvParse::skipped`]. The key is split on the first `=` only; one pair of
/// matching surrounding quotes is stripped from the value. Later duplicates win.
pub fn parse_kv(contents: &str) -> KvParse {
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
    let mut parsed = KvParse::default();
    let mut seen_at: BTreeMap<String, usize> = BTreeMap::new();

    for (idx, raw) in LINE_BREAK.split(contents).enumerate() {
        let lineno = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            parsed.skipped.push(SkippedLine {
                lineno,
                line: line.to_string(),
            });
            continue;
        };
        let key = key.trim().to_string();
        let value = strip_quotes(value.trim()).to_string();

        if let Some(previous_lineno) = seen_at.insert(key.clone(), lineno) {
            parsed.duplicates.push(DuplicateKey {
                key: key.clone(),
                previous_lineno,
                lineno,
            });
        }
        parsed.context.insert(key, value);
    }

    parsed
}

fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &value[1..value.len() - 1];
        }
    }
    value
}
