//! Textual scanners for figure, table and source elements.

use crate::model::{DottedKey, ElementKind, StructuralElement, Target};
use once_cell::sync::Lazy;
use regex::{Match, Regex};

/// Longest range expanded from a bracket such as "[2–40]".
const MAX_RANGE_LEN: u32 = 50;

static FIGURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:рис(?:\.|ун(?:ок|к[аеу]|ком|ками|ках))|мал(?:\.|юн(?:ак|к[аеу]|кам|камі|ках)))\s*(\d+(?:\.\d+)*)")
        .expect("valid figure regex")
});

static TABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bтабл(?:\.|иц(?:[аеуы]|ей|ею|ами|ах)|іц(?:[аыу]|ай|аю|амі|ах))\s*(\d+(?:\.\d+)*)")
        .expect("valid table regex")
});

static FIGURE_CAPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:рисунок|малюнак)").expect("valid caption regex"));

static TABLE_CAPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:таблица|табліца)").expect("valid caption regex"));

static BRACKET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\s*(\d[^\[\]]*)\]").expect("valid bracket regex"));

static BRACKET_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)(?:\s*[-–—]\s*(\d+))?$").expect("valid bracket item regex")
});

static PAGE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:с|c|стр|p|pp|л)\.\s*\d").expect("valid page suffix regex")
});

static ENTRY_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)").expect("valid entry number regex"));

/// Find figure declarations and references in a paragraph.
pub fn scan_figures(text: &str, paragraph: usize) -> Vec<StructuralElement> {
    scan_numbered(text, paragraph, Target::Figure, &FIGURE, |m, _| {
        FIGURE_CAPTION.is_match(m.as_str())
    })
}

/// Find table declarations and references in a paragraph.
///
/// A caption must not continue with a lowercase word: "Таблица 1
/// показывает..." is a reference.
pub fn scan_tables(text: &str, paragraph: usize) -> Vec<StructuralElement> {
    scan_numbered(text, paragraph, Target::Table, &TABLE, |m, trimmed| {
        if !TABLE_CAPTION.is_match(m.as_str()) {
            return false;
        }
        let rest = trimmed[m.end()..].trim_start();
        rest.chars().next().map_or(true, |c| !c.is_lowercase())
    })
}

fn scan_numbered<F>(
    text: &str,
    paragraph: usize,
    target: Target,
    pattern: &Regex,
    is_caption: F,
) -> Vec<StructuralElement>
where
    F: Fn(&Match<'_>, &str) -> bool,
{
    let trimmed = text.trim_start();
    let matches: Vec<(Match<'_>, DottedKey)> = pattern
        .captures_iter(trimmed)
        .filter_map(|c| {
            let whole = c.get(0)?;
            let key = c.get(1)?.as_str().parse().ok()?;
            Some((whole, key))
        })
        .collect();

    let single = matches.len() == 1;
    matches
        .into_iter()
        .map(|(m, key)| {
            let declaration = single && m.start() == 0 && is_caption(&m, trimmed);
            let kind = if declaration {
                ElementKind::declaration(target)
            } else {
                ElementKind::reference(target)
            };
            StructuralElement::new(kind, key, paragraph)
        })
        .collect()
}

/// Find bracketed source references ("[3]", "[1, 4]", "[2–5]", "[7, с. 12]").
pub fn scan_source_references(text: &str, paragraph: usize) -> Vec<StructuralElement> {
    let mut out = Vec::new();
    for caps in BRACKET.captures_iter(text) {
        let Some(inner) = caps.get(1) else { continue };
        let numbers = bracket_numbers(inner.as_str());
        out.extend(numbers.into_iter().map(|n| {
            StructuralElement::new(
                ElementKind::SourceReference,
                DottedKey::new(vec![n]),
                paragraph,
            )
        }));
    }
    out
}

fn bracket_numbers(inner: &str) -> Vec<u32> {
    let mut numbers = Vec::new();
    for item in inner.split([',', ';']).map(str::trim) {
        if PAGE_SUFFIX.is_match(item) {
            break;
        }
        let Some(caps) = BRACKET_ITEM.captures(item) else {
            return Vec::new();
        };
        let Some(start) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) else {
            return Vec::new();
        };
        match caps.get(2).and_then(|m| m.as_str().parse::<u32>().ok()) {
            Some(end) if end >= start && end - start < MAX_RANGE_LEN => {
                numbers.extend(start..=end);
            }
            _ => numbers.push(start),
        }
    }
    numbers
}

/// Bibliography entry number at the start of a paragraph.
pub fn scan_source_declaration(text: &str, paragraph: usize) -> Option<StructuralElement> {
    let n = ENTRY_NUMBER
        .captures(text)?
        .get(1)?
        .as_str()
        .parse::<u32>()
        .ok()?;
    Some(StructuralElement::new(
        ElementKind::SourceDeclaration,
        DottedKey::new(vec![n]),
        paragraph,
    ))
}
