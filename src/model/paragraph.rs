//! Paragraph and paragraph-style types.

use serde::{Deserialize, Serialize};

use super::{Citation, Finding, NodeId, StructuralElement};

/// Marker the document loader leaves in place of a hard page break.
pub const PAGE_BREAK_MARKER: &str = "{PageBreak}";

/// Highest outline level a style may carry (0-based, so nine levels).
pub const MAX_OUTLINE_LEVEL: u8 = 8;

/// A paragraph of the audited document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    /// Position in the document (0-based, contiguous)
    #[serde(default)]
    pub index: usize,

    /// Visible text; numbering reconstruction prepends the list label
    pub text: String,

    /// Reconstructed list label, if the paragraph is list-numbered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    /// Resolved paragraph style
    #[serde(default)]
    pub style: ParagraphStyle,

    /// Analysis results accumulated by the pipeline
    #[serde(default)]
    pub meta: Annotation,
}

impl Paragraph {
    /// Create a paragraph with default style.
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            number: None,
            style: ParagraphStyle::default(),
            meta: Annotation::default(),
        }
    }

    /// Create a paragraph with the given style.
    pub fn with_style(index: usize, text: impl Into<String>, style: ParagraphStyle) -> Self {
        Self {
            style,
            ..Self::new(index, text)
        }
    }

    /// Text with page-break markers removed and surrounding whitespace trimmed.
    pub fn pure_text(&self) -> String {
        self.text.replace(PAGE_BREAK_MARKER, "").trim().to_string()
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.pure_text().is_empty()
    }

    /// Check if the pipeline marked this paragraph as a header.
    pub fn is_header(&self) -> bool {
        self.meta.is_header
    }

    /// Outline level from the style, if it is a valid heading level.
    pub fn outline_level(&self) -> Option<u8> {
        self.style
            .outline_level
            .filter(|level| *level <= MAX_OUTLINE_LEVEL)
    }

    /// Check if this paragraph carries a figure or table caption.
    pub fn is_caption(&self) -> bool {
        self.meta.elements.iter().any(|e| {
            matches!(
                e.kind,
                super::ElementKind::FigureDeclaration | super::ElementKind::TableDeclaration
            )
        })
    }

    /// Attach a finding to this paragraph.
    pub fn add_finding(&mut self, finding: Finding) {
        self.meta.findings.push(finding);
    }
}

/// Mutable analysis state of a paragraph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Annotation {
    /// Paragraph opens a hierarchy node
    #[serde(default)]
    pub is_header: bool,

    /// Hierarchy node that owns this paragraph (header or content)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<NodeId>,

    /// Figure/table/source declarations and references found in the text
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<StructuralElement>,

    /// Parsed bibliography record, for bibliography entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<Citation>,

    /// Validation findings attached to this paragraph
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<Finding>,
}

/// Resolved paragraph style.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Font family name
    #[serde(default)]
    pub font_name: Option<String>,

    /// Font size in points
    #[serde(default)]
    pub font_size: Option<f32>,

    /// Bold text
    #[serde(default)]
    pub bold: bool,

    /// Text alignment
    #[serde(default)]
    pub alignment: Alignment,

    /// First-line indent in centimetres
    #[serde(default)]
    pub first_line_indent: Option<f32>,

    /// Line spacing multiplier (1.0 = single)
    #[serde(default)]
    pub line_spacing: Option<f32>,

    /// Outline level (0 = top-level heading), None for body text
    #[serde(default)]
    pub outline_level: Option<u8>,

    /// List numbering this paragraph takes part in
    #[serde(default)]
    pub numbering: Option<NumberingRef>,
}

impl ParagraphStyle {
    /// Style of a heading at the given outline level.
    pub fn heading(level: u8) -> Self {
        Self {
            outline_level: Some(level.min(MAX_OUTLINE_LEVEL)),
            bold: true,
            ..Default::default()
        }
    }

    /// Style of a list item governed by a numbering definition.
    pub fn list_item(numbering_id: u32, level: u8) -> Self {
        Self {
            numbering: Some(NumberingRef {
                id: numbering_id,
                level,
            }),
            ..Default::default()
        }
    }
}

/// Reference from a paragraph style to a numbering definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberingRef {
    /// Numbering definition id
    pub id: u32,

    /// List level inside the definition (0-based)
    pub level: u8,
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}
