//! Document-level types.

use super::{NumberingDefinition, Paragraph, Section};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A thesis document handed over by the loader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, author, etc.)
    #[serde(default)]
    pub metadata: Metadata,

    /// Paragraphs in document order
    pub paragraphs: Vec<Paragraph>,

    /// List numbering definitions referenced by paragraph styles
    #[serde(default)]
    pub numberings: Vec<NumberingDefinition>,

    /// Page geometry per section
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from paragraphs; positions are re-assigned.
    pub fn from_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        let mut doc = Self {
            paragraphs,
            ..Default::default()
        };
        doc.reindex();
        doc
    }

    /// Create a document from plain text lines with default styles.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paragraphs = lines
            .into_iter()
            .enumerate()
            .map(|(i, text)| Paragraph::new(i, text))
            .collect();
        Self::from_paragraphs(paragraphs)
    }

    /// Deserialize a document from loader JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut doc: Document = serde_json::from_str(json)?;
        doc.validate()?;
        doc.reindex();
        Ok(doc)
    }

    /// Add a paragraph at the end of the document.
    pub fn push(&mut self, mut paragraph: Paragraph) {
        paragraph.index = self.paragraphs.len();
        self.paragraphs.push(paragraph);
    }

    /// Add a numbering definition.
    pub fn add_numbering(&mut self, numbering: NumberingDefinition) {
        self.numberings.push(numbering);
    }

    /// Add a section.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Get a paragraph by position.
    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }

    /// Get a numbering definition by id.
    pub fn numbering(&self, id: u32) -> Option<&NumberingDefinition> {
        self.numberings.iter().find(|n| n.id == id)
    }

    /// Number of paragraphs.
    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    /// Check if the document has any paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.pure_text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Make paragraph positions contiguous and monotonic.
    pub fn reindex(&mut self) {
        for (i, p) in self.paragraphs.iter_mut().enumerate() {
            p.index = i;
        }
    }

    fn validate(&self) -> Result<()> {
        for numbering in &self.numberings {
            if numbering.levels.len() > super::MAX_NUMBERING_LEVELS {
                return Err(Error::InvalidDocument(format!(
                    "numbering definition {} has {} levels (at most {} allowed)",
                    numbering.id,
                    numbering.levels.len(),
                    super::MAX_NUMBERING_LEVELS
                )));
            }
        }
        Ok(())
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    #[serde(default)]
    pub title: Option<String>,

    /// Document author
    #[serde(default)]
    pub author: Option<String>,

    /// Source file name
    #[serde(default)]
    pub source: Option<String>,

    /// Creation date
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
    }

    #[test]
    fn test_from_lines_indexes() {
        let doc = Document::from_lines(["ВВЕДЕНИЕ", "Текст"]);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.paragraphs[1].index, 1);
        assert_eq!(doc.plain_text(), "ВВЕДЕНИЕ\nТекст");
    }

    #[test]
    fn test_from_json_reindexes() {
        let json = r#"{
            "paragraphs": [
                {"index": 7, "text": "ВВЕДЕНИЕ"},
                {"index": 3, "text": "Текст", "style": {"first_line_indent": 1.25}}
            ],
            "numberings": [{"id": 1, "levels": [{"text": "%1."}]}]
        }"#;
        let doc = Document::from_json(json).unwrap();
        assert_eq!(doc.paragraphs[0].index, 0);
        assert_eq!(doc.paragraphs[1].index, 1);
        assert_eq!(doc.paragraphs[1].style.first_line_indent, Some(1.25));
        assert!(doc.numbering(1).is_some());
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_from_json_rejects_deep_numbering() {
        let levels: Vec<String> = (1..=10).map(|k| format!("{{\"text\": \"%{}\"}}", k)).collect();
        let json = format!(
            "{{\"paragraphs\": [], \"numberings\": [{{\"id\": 2, \"levels\": [{}]}}]}}",
            levels.join(",")
        );
        let err = Document::from_json(&json).unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_)));
    }

    #[test]
    fn test_from_json_syntax_error() {
        assert!(matches!(
            Document::from_json("{not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_push_assigns_index() {
        let mut doc = Document::new();
        doc.push(Paragraph::new(42, "a"));
        doc.push(Paragraph::new(42, "b"));
        assert_eq!(doc.paragraphs[1].index, 1);
    }
}
