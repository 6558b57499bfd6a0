//! Audit report with the annotated document and statistics.

use crate::model::{Category, Document, Finding, Hierarchy, Severity};
use crate::structure::{DocumentParts, Header};
use serde::Serialize;

/// Result of auditing one document.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// The document with every paragraph annotated
    pub document: Document,

    /// Top-level parts
    pub parts: DocumentParts,

    /// Accepted main-part headers
    pub headers: Vec<Header>,

    /// Document tree
    pub hierarchy: Hierarchy,

    /// Findings not tied to a paragraph (structure, page geometry)
    pub findings: Vec<Finding>,

    /// Audit statistics
    pub stats: AuditStats,
}

/// A finding together with the paragraph it is attached to.
#[derive(Debug, Clone, Copy)]
pub struct Located<'a> {
    /// Paragraph position, None for document-level findings
    pub paragraph: Option<usize>,
    /// The finding
    pub finding: &'a Finding,
}

impl AuditReport {
    /// Every finding, document-level first, then in paragraph order.
    pub fn all_findings(&self) -> Vec<Located<'_>> {
        let document = self.findings.iter().map(|finding| Located {
            paragraph: None,
            finding,
        });
        let paragraphs = self.document.paragraphs.iter().flat_map(|p| {
            p.meta.findings.iter().map(move |finding| Located {
                paragraph: Some(p.index),
                finding,
            })
        });
        document.chain(paragraphs).collect()
    }

    /// Findings of one category.
    pub fn findings_in(&self, category: Category) -> Vec<Located<'_>> {
        self.all_findings()
            .into_iter()
            .filter(|l| l.finding.category() == category)
            .collect()
    }

    /// Check if any finding is an error.
    pub fn has_errors(&self) -> bool {
        self.stats.error_count > 0
    }

    /// Source path or title of the document, if known.
    pub fn source(&self) -> Option<&str> {
        self.document
            .metadata
            .source
            .as_deref()
            .or(self.document.metadata.title.as_deref())
    }
}

/// Statistics collected during an audit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditStats {
    /// Paragraphs in the document
    pub paragraph_count: usize,

    /// Paragraphs marked as headers (part titles included)
    pub header_count: usize,

    /// Hierarchy nodes, root excluded
    pub node_count: usize,

    /// Figure, table and source declarations
    pub declaration_count: usize,

    /// Figure, table and source references
    pub reference_count: usize,

    /// Declarations and references without a counterpart
    pub missing_count: usize,

    /// Bibliography entries analysed
    pub citation_count: usize,

    /// Entries matched by a citation grammar
    pub recognized_citations: usize,

    /// Errors found
    pub error_count: usize,

    /// Warnings found
    pub warning_count: usize,
}

impl AuditStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finding.
    pub fn add_finding(&mut self, finding: &Finding) {
        match finding.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
    }

    /// Total number of findings.
    pub fn finding_count(&self) -> usize {
        self.error_count + self.warning_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FindingKind;

    fn report(doc: Document, findings: Vec<Finding>) -> AuditReport {
        let mut stats = AuditStats::new();
        for f in &findings {
            stats.add_finding(f);
        }
        for p in &doc.paragraphs {
            p.meta.findings.iter().for_each(|f| stats.add_finding(f));
        }
        AuditReport {
            document: doc,
            parts: DocumentParts::default(),
            headers: Vec::new(),
            hierarchy: Hierarchy::new(),
            findings,
            stats,
        }
    }

    #[test]
    fn test_all_findings_order() {
        let mut doc = Document::from_lines(["a", "b"]);
        doc.paragraphs[1].add_finding(Finding::error(FindingKind::MalformedCitation));
        let r = report(
            doc,
            vec![Finding::warning(FindingKind::UnrecognizedDocumentStructure)],
        );

        let all = r.all_findings();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].paragraph, None);
        assert_eq!(all[1].paragraph, Some(1));
        assert!(r.has_errors());
        assert_eq!(r.stats.finding_count(), 2);
        assert_eq!(r.findings_in(Category::Citation).len(), 1);
    }

    #[test]
    fn test_warnings_only() {
        let r = report(
            Document::new(),
            vec![Finding::warning(FindingKind::UnrecognizedDocumentStructure)],
        );
        assert!(!r.has_errors());
        assert_eq!(r.stats.warning_count, 1);
    }
}
