//! Bibliography entry parsing and canonical rendering.
//!
//! Each entry of the bibliography is tried against the electronic resource
//! grammars first and the book grammar second. A recognised entry is
//! rendered back in canonical form and compared with its source text.
//!
//! # Example
//!
//! ```
//! use gostlint::citation::parse;
//! use gostlint::CitationRecord;
//!
//! let (record, canonical) =
//!     parse("1. Шотт, А.В. Курс лекций / А.В. Шотт. - Минск : Асар, 2004. - 525 с.");
//! assert!(matches!(record, CitationRecord::Book(_)));
//! assert_eq!(canonical, "Шотт, А.В. Курс лекций / А.В. Шотт. – Минск : Асар, 2004. – 525 с.");
//! ```

pub mod book;
pub mod electronic;
pub mod grammar;
pub mod person;

pub use book::parse_book;
pub use electronic::{parse_web_page, parse_web_site};
pub use grammar::normalize;
pub use person::{parse_direct_list, starts_with_person, strip_heading};

use crate::model::{
    Citation, CitationRecord, ElementKind, Finding, FindingKind, Hierarchy, Paragraph, PartType,
};
use once_cell::sync::Lazy;
use regex::Regex;

const ELECTRONIC_TOKENS: [&str; 9] = [
    "http:/", "https:/", "www.", ".asp", ".ru", ".by", ".com", ".org", ".html",
];

static ELECTRONIC_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Электронный\s+ресурс|Electronic\s+resource|Режим\s+доступа|Mode\s+of\s+access")
        .expect("valid electronic phrase regex")
});

/// Counts of bibliography entries by outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CitationCounts {
    /// Entries analysed
    pub entries: usize,
    /// Entries matched by a grammar
    pub recognized: usize,
    /// Entries no grammar matched
    pub malformed: usize,
    /// Recognised entries whose text differs from the canonical form
    pub deviations: usize,
}

/// Check if a text carries electronic resource indicators.
pub fn looks_electronic(text: &str) -> bool {
    ELECTRONIC_TOKENS.iter().any(|t| text.contains(t)) || ELECTRONIC_PHRASE.is_match(text)
}

/// Parse one entry and render its canonical form.
///
/// For unrecognised entries the canonical text is the normalised input.
pub fn parse(text: &str) -> (CitationRecord, String) {
    let body = normalize(text);
    if let Some(page) = parse_web_page(&body) {
        let canonical = page.to_string();
        return (CitationRecord::WebPage(page), canonical);
    }
    if let Some(site) = parse_web_site(&body) {
        let canonical = site.to_string();
        return (CitationRecord::WebSite(site), canonical);
    }
    if let Some(book) = parse_book(&body) {
        let canonical = book.to_string();
        return (CitationRecord::Book(book), canonical);
    }
    let record = if looks_electronic(&body) {
        CitationRecord::UnknownElectronic
    } else {
        CitationRecord::Unknown
    };
    (record, body)
}

/// Analyse one bibliography paragraph.
///
/// Returns the citation and the finding it raises, if any.
pub fn analyze_entry(paragraph: &Paragraph) -> (Citation, Option<Finding>) {
    let text = paragraph.pure_text();
    let (record, canonical) = parse(&text);
    let finding = match record {
        CitationRecord::Unknown => Some(Finding::error(FindingKind::MalformedCitation)),
        CitationRecord::UnknownElectronic => {
            Some(Finding::error(FindingKind::MalformedElectronicCitation))
        }
        _ if canonical != normalize(&text) => Some(Finding::error(FindingKind::CitationFormat {
            expected: canonical.clone(),
        })),
        _ => None,
    };
    let citation = Citation {
        paragraph: paragraph.index,
        record,
        canonical,
    };
    (citation, finding)
}

/// Parse every declared entry inside the bibliography node.
pub fn check_citations(paragraphs: &mut [Paragraph], hierarchy: &Hierarchy) -> CitationCounts {
    let mut counts = CitationCounts::default();
    let Some(bibliography) = hierarchy.part(PartType::Bibliography) else {
        log::debug!("no bibliography node, citations skipped");
        return counts;
    };

    for &index in &hierarchy.node(bibliography).content {
        let Some(paragraph) = paragraphs.get_mut(index) else {
            continue;
        };
        let declared = paragraph
            .meta
            .elements
            .iter()
            .any(|e| e.kind == ElementKind::SourceDeclaration);
        if !declared {
            continue;
        }

        let (citation, finding) = analyze_entry(paragraph);
        counts.entries += 1;
        if citation.record.is_recognized() {
            counts.recognized += 1;
        } else {
            counts.malformed += 1;
        }
        if let Some(finding) = finding {
            if matches!(finding.kind, FindingKind::CitationFormat { .. }) {
                counts.deviations += 1;
            }
            log::trace!("paragraph {}: {}", index, finding);
            paragraph.add_finding(finding);
        }
        paragraph.meta.citation = Some(citation);
    }

    log::debug!(
        "checked {} citations: {} recognised, {} malformed, {} deviating",
        counts.entries,
        counts.recognized,
        counts.malformed,
        counts.deviations
    );
    counts
}
