//! Repair of Jinja placeholders inside WordprocessingML.
//!
//! Word stores text in runs (`<w:r><w:t>..</w:t></w:r>`) and often splits a
//! typed `{{ NAME }}` over several of them, e.g. after a spell check or a
//! formatting change. Before a part can be handed to the template engine every
//! tag span must be contiguous text again.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `{` + markup + `{`, `%` or `#`: an opening delimiter split by markup.
static SPLIT_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?:<[^>]*>)+([{%#])").unwrap());
/// `}`, `%` or `#` + markup + `}`: a closing delimiter split by markup.
static SPLIT_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([}%#])(?:<[^>]*>)+\}").unwrap());
/// A complete expression, statement or comment span.
static TAG_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{.*?\}\}|\{%.*?%\}|\{#.*?#\}").unwrap());
static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Make every placeholder in `xml` a contiguous run of template source.
///
/// Markup inside a delimiter or tag span is removed, XML entities inside spans
/// are decoded and typographic quotes are straightened, so that
/// `{{</w:t></w:r><w:r><w:t> NAME }}` becomes `{{ NAME }}`. Text outside
/// spans is returned untouched.
pub fn patch_xml(xml: &str) -> Cow<'_, str> {
    let mut patched = Cow::Borrowed(xml);
    if let Some(joined) = into_owned(SPLIT_OPEN.replace_all(&patched, "{$1")) {
        patched = Cow::Owned(joined);
    }
    if let Some(joined) = into_owned(SPLIT_CLOSE.replace_all(&patched, "${1}}")) {
        patched = Cow::Owned(joined);
    }
    if let Some(cleaned) = into_owned(
        TAG_SPAN.replace_all(&patched, |caps: &Captures<'_>| clean_span(&caps[0])),
    ) {
        patched = Cow::Owned(cleaned);
    }
    patched
}

/// `Some` only if a replacement actually happened.
fn into_owned(replaced: Cow<'_, str>) -> Option<String> {
    match replaced {
        Cow::Borrowed(_) => None,
        Cow::Owned(owned) => Some(owned),
    }
}

/// True if `xml` contains anything the template engine would interpret.
pub fn has_template_syntax(xml: &str) -> bool {
    xml.contains('{')
}

fn clean_span(span: &str) -> String {
    let text = MARKUP.replace_all(span, "");
    text.replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201c}', '\u{201d}'], "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
