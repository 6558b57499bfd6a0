//! Shared separators and tokens of the bibliography grammars.
//!
//! An entry is a sequence of areas joined by ". – ". Inside an area the
//! standard uses " / " before the responsibility statement, " // " before
//! the host publication and " ; " between responsibility clauses.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;
use unicode_normalization::UnicodeNormalization;

/// Canonical separator between areas.
pub const AREA_SEPARATOR: &str = ". – ";

/// Separator used when the previous area already ends with a dot.
pub const AREA_DASH: &str = " – ";

/// Canonical responsibility separator.
pub const RESPONSIBILITY: &str = " / ";

/// Canonical host publication separator.
pub const HOST: &str = " // ";

/// Canonical separator between responsibility clauses.
pub const CLAUSE: &str = " ; ";

// After a dot the dash may be unspaced, except a bare hyphen ("Ж.-П.").
static AREA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.\s*(?:--|[–—])\s*|\.(?:\s+-\s*|-\s+)|,?\s+(?:--|[-–—])\s+")
        .expect("valid area separator")
});

static CLAUSE_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+;\s+").expect("valid clause separator"));

static ENTRY_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\s*[.)]?\s*").expect("valid entry label"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace"));

static ET_AL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\[\s*(?:и\s+др|і\s+інш)\.?\s*\]|и\s+др\.|і\s+інш\.)$").expect("valid et al")
});

/// Regex fragment matching an "et al." tag in any accepted spelling.
pub const ET_AL_PATTERN: &str = r"(?:\[\s*(?:и\s+др|і\s+інш)\.?\s*\]|и\s+др\.|і\s+інш\.)";

/// Strip the entry label, collapse whitespace and apply NFC.
pub fn normalize(text: &str) -> String {
    let body = ENTRY_LABEL.replace(text, "");
    let collapsed = WHITESPACE.replace_all(body.trim(), " ");
    collapsed.nfc().collect()
}

/// Split an entry into its areas.
pub fn split_areas(text: &str) -> Vec<&str> {
    AREA.split(text).map(str::trim).collect()
}

/// Byte spans of the area separators, in order.
pub fn area_breaks(text: &str) -> Vec<Range<usize>> {
    AREA.find_iter(text).map(|m| m.range()).collect()
}

/// Check if a separator span is written with a leading dot.
pub fn is_dotted_break(text: &str, span: &Range<usize>) -> bool {
    text[span.clone()].starts_with('.')
}

/// Split a responsibility statement into clauses.
pub fn split_clauses(text: &str) -> Vec<&str> {
    CLAUSE_SPLIT
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split at the first occurrence of a spaced separator such as " / ".
///
/// A doubled separator (" // ") never matches the single form.
pub fn split_once_spaced(text: &str, separator: char) -> Option<(&str, &str)> {
    let pattern = format!(" {} ", separator);
    let at = text.find(&pattern)?;
    Some((text[..at].trim(), text[at + pattern.len()..].trim()))
}

/// Split at the first " // ".
pub fn split_host(text: &str) -> (&str, Option<&str>) {
    match text.find(HOST) {
        Some(at) => (text[..at].trim(), Some(text[at + HOST.len()..].trim())),
        None => (text, None),
    }
}

/// Check if a clause is an "et al." tag.
pub fn is_et_al(text: &str) -> bool {
    ET_AL.is_match(text.trim())
}

/// Join areas, writing " – " after areas that already end with a dot.
pub fn join_areas<I, S>(areas: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for area in areas {
        let area = area.as_ref();
        if area.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push_str(if out.ends_with('.') {
                AREA_DASH
            } else {
                AREA_SEPARATOR
            });
        }
        out.push_str(area);
    }
    out
}

/// Check if text contains at least one letter or digit.
pub fn has_content(text: &str) -> bool {
    text.chars().any(char::is_alphanumeric)
}
