//! Validation findings attached to paragraphs or to the whole document.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DottedKey, Target};

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Probably fine, but worth a look
    Warning,
    /// Violates the standard
    Error,
}

/// Broad group a finding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Document parts and headers
    Structural,
    /// Figure, table and source cross-references
    Reference,
    /// Bibliography entries
    Citation,
    /// Fonts, spacing, indents and page geometry
    Formatting,
}

/// What was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FindingKind {
    /// No part title was recognised anywhere in the document
    UnrecognizedDocumentStructure,

    /// A reference points at a key nobody declares
    MissingDeclaration {
        /// Referenced target kind
        target: Target,
        /// Referenced key
        key: DottedKey,
    },

    /// A declaration is never referenced
    MissingReference {
        /// Declared target kind
        target: Target,
        /// Declared key
        key: DottedKey,
    },

    /// Declaration keys are not strictly increasing
    NumberingOrder {
        /// Declared target kind
        target: Target,
        /// Key of this declaration
        key: DottedKey,
        /// Key of the preceding declaration
        previous: DottedKey,
    },

    /// The first reference does not precede the declaration
    ReferenceAfterDeclaration {
        /// Referenced target kind
        target: Target,
        /// Referenced key
        key: DottedKey,
    },

    /// No citation grammar matched the entry
    MalformedCitation,

    /// Entry looks like an electronic resource but does not match its grammar
    MalformedElectronicCitation,

    /// Entry was recognised but deviates from the canonical layout
    CitationFormat {
        /// Canonical rendering of the parsed entry
        expected: String,
    },

    /// Wrong font family
    FontName {
        /// Font found
        actual: String,
        /// Font required
        expected: String,
    },

    /// Wrong font size
    FontSize {
        /// Size found, in points
        actual: f32,
    },

    /// Missing or unexpected first-line indent
    FirstLineIndent {
        /// Indent found, in centimetres
        actual: f32,
    },

    /// Wrong line spacing
    LineSpacing {
        /// Spacing found
        actual: f32,
    },

    /// Section margins differ from the required ones
    PageMargins {
        /// 1-based section number
        section: usize,
        /// Margins found
        actual: String,
        /// Margins required
        expected: String,
    },

    /// Section page size is not the required one
    PageSize {
        /// 1-based section number
        section: usize,
    },

    /// The title page carries a page number
    TitlePageNumbered,

    /// A section after the title page is not numbered
    PagesNotNumbered {
        /// 1-based section number
        section: usize,
    },
}

impl FindingKind {
    /// Category of this finding.
    pub fn category(&self) -> Category {
        match self {
            FindingKind::UnrecognizedDocumentStructure => Category::Structural,
            FindingKind::MissingDeclaration { .. }
            | FindingKind::MissingReference { .. }
            | FindingKind::NumberingOrder { .. }
            | FindingKind::ReferenceAfterDeclaration { .. } => Category::Reference,
            FindingKind::MalformedCitation
            | FindingKind::MalformedElectronicCitation
            | FindingKind::CitationFormat { .. } => Category::Citation,
            FindingKind::FontName { .. }
            | FindingKind::FontSize { .. }
            | FindingKind::FirstLineIndent { .. }
            | FindingKind::LineSpacing { .. }
            | FindingKind::PageMargins { .. }
            | FindingKind::PageSize { .. }
            | FindingKind::TitlePageNumbered
            | FindingKind::PagesNotNumbered { .. } => Category::Formatting,
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingKind::UnrecognizedDocumentStructure => {
                write!(f, "No part titles found; document structure not recognised")
            }
            FindingKind::MissingDeclaration { target, key } => {
                write!(f, "Reference to undeclared {} {}", target, key)
            }
            FindingKind::MissingReference { target, key } => {
                write!(f, "{} {} is never referenced", capitalize(target), key)
            }
            FindingKind::NumberingOrder {
                target,
                key,
                previous,
            } => write!(
                f,
                "Wrong {} numbering order ({} after {})",
                target, key, previous
            ),
            FindingKind::ReferenceAfterDeclaration { target, key } => write!(
                f,
                "First reference must precede the {} ({} {})",
                target, target, key
            ),
            FindingKind::MalformedCitation => write!(f, "Source has an invalid format"),
            FindingKind::MalformedElectronicCitation => {
                write!(f, "Electronic source has an invalid format")
            }
            FindingKind::CitationFormat { expected } => {
                write!(f, "Expected format: {}", expected)
            }
            FindingKind::FontName { actual, expected } => {
                write!(f, "Wrong font ({}, expected {})", actual, expected)
            }
            FindingKind::FontSize { actual } => write!(f, "Wrong font size ({})", actual),
            FindingKind::FirstLineIndent { actual } => {
                write!(f, "Wrong first-line indent ({})", actual)
            }
            FindingKind::LineSpacing { actual } => write!(f, "Wrong line spacing ({})", actual),
            FindingKind::PageMargins {
                section,
                actual,
                expected,
            } => write!(
                f,
                "Wrong margins in section #{} ({}; expected {})",
                section, actual, expected
            ),
            FindingKind::PageSize { section } => {
                write!(f, "Wrong page size in section #{}, A4 expected", section)
            }
            FindingKind::TitlePageNumbered => write!(f, "Title page carries a page number"),
            FindingKind::PagesNotNumbered { section } => {
                write!(f, "Pages are not numbered in section #{}", section)
            }
        }
    }
}

fn capitalize(target: &Target) -> String {
    let s = target.to_string();
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => s,
    }
}

/// A validation finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Severity
    pub severity: Severity,

    /// What was found
    #[serde(flatten)]
    pub kind: FindingKind,
}

impl Finding {
    /// Create an error finding.
    pub fn error(kind: FindingKind) -> Self {
        Self {
            severity: Severity::Error,
            kind,
        }
    }

    /// Create a warning finding.
    pub fn warning(kind: FindingKind) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
        }
    }

    /// Category of this finding.
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Human-readable message.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}
