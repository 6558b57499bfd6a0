//! # gostlint
//!
//! Structural, cross-reference and bibliography auditing of thesis
//! documents formatted to the GOST standard.
//!
//! The library takes a document as a flat list of styled paragraphs
//! (handed over by an external loader, usually as JSON), infers its parts
//! and header hierarchy, resolves figure, table and source references,
//! parses bibliography entries and checks formatting. Every problem found
//! is attached to the paragraph responsible as a [`Finding`].
//!
//! ## Quick Start
//!
//! ```
//! use gostlint::{audit, AuditOptions, Document};
//!
//! let doc = Document::from_lines([
//!     "ВВЕДЕНИЕ",
//!     "Как показано на рис. 1, ...",
//!     "Рисунок 1 – Схема",
//! ]);
//! let report = audit(doc, &AuditOptions::default().with_formatting(false));
//! assert!(!report.has_errors());
//! ```
//!
//! ## Pipeline
//!
//! - **Numbering**: list labels are rebuilt from numbering definitions
//! - **Parts**: title, abstracts, contents, introduction, main part,
//!   conclusion, bibliography and annexes
//! - **Headers**: numbered main-part headers, validated in runs
//! - **Hierarchy**: an index-based tree of headers and content
//! - **References**: figure/table/source declarations and references
//! - **Citations**: book and electronic resource grammars with canonical
//!   rendering
//! - **Formatting**: fonts, spacing, indents and page geometry

pub mod citation;
pub mod error;
pub mod format;
pub mod model;
pub mod options;
pub mod references;
pub mod render;
pub mod report;
pub mod structure;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    Alignment, Category, Citation, CitationRecord, Document, DottedKey, ElementKind, Finding,
    FindingKind, Hierarchy, Metadata, Node, NodeId, NumberingDefinition, NumberingLevel,
    Paragraph, ParagraphStyle, PartType, Section, Severity, StructuralElement, Target,
};
pub use options::{AuditOptions, FormatRules, HeaderScope};
pub use render::{JsonFormat, TextOptions};
pub use report::{AuditReport, AuditStats};

use rayon::prelude::*;
use std::path::Path;

/// Audit a document.
///
/// Stages run in a fixed order, each reading the annotations of the
/// previous ones. Analysis never fails; problems become findings.
///
/// # Example
///
/// ```
/// use gostlint::{audit, AuditOptions, Document, FindingKind};
///
/// let doc = Document::from_lines(["просто текст"]);
/// let report = audit(doc, &AuditOptions::default().structure_only());
/// assert_eq!(report.findings[0].kind, FindingKind::UnrecognizedDocumentStructure);
/// ```
pub fn audit(mut doc: Document, options: &AuditOptions) -> AuditReport {
    let structure = structure::analyze(&mut doc, options);
    let mut findings = Vec::new();
    let mut stats = AuditStats::new();

    if !structure.parts.is_recognized() {
        findings.push(Finding::warning(FindingKind::UnrecognizedDocumentStructure));
    }

    if options.check_references {
        let counts = references::resolve_references(&mut doc.paragraphs, &structure.hierarchy);
        stats.declaration_count = counts.declarations;
        stats.reference_count = counts.references;
        stats.missing_count = counts.missing;
    } else if options.check_citations {
        references::mark_source_declarations(&mut doc.paragraphs, &structure.hierarchy);
    }

    if options.check_citations {
        let counts = citation::check_citations(&mut doc.paragraphs, &structure.hierarchy);
        stats.citation_count = counts.entries;
        stats.recognized_citations = counts.recognized;
    }

    if options.check_formatting {
        findings.extend(format::check_formatting(&mut doc, &options.format_rules));
    }

    stats.paragraph_count = doc.paragraphs.len();
    stats.header_count = doc.paragraphs.iter().filter(|p| p.is_header()).count();
    stats.node_count = structure.hierarchy.len().saturating_sub(1);
    for finding in findings
        .iter()
        .chain(doc.paragraphs.iter().flat_map(|p| p.meta.findings.iter()))
    {
        stats.add_finding(finding);
    }

    log::debug!(
        "audit finished: {} paragraphs, {} errors, {} warnings",
        stats.paragraph_count,
        stats.error_count,
        stats.warning_count
    );

    AuditReport {
        document: doc,
        parts: structure.parts,
        headers: structure.headers,
        hierarchy: structure.hierarchy,
        findings,
        stats,
    }
}

/// Audit independent documents, in parallel when `options.parallel` is set.
pub fn audit_batch(documents: Vec<Document>, options: &AuditOptions) -> Vec<AuditReport> {
    if options.parallel {
        documents
            .into_par_iter()
            .map(|doc| audit(doc, options))
            .collect()
    } else {
        documents.into_iter().map(|doc| audit(doc, options)).collect()
    }
}

/// Load a document from a loader JSON file.
///
/// The file name becomes the document source unless the JSON names one.
///
/// # Example
///
/// ```no_run
/// use gostlint::load_document;
///
/// let doc = load_document("thesis.json").unwrap();
/// println!("Paragraphs: {}", doc.len());
/// ```
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let mut doc = Document::from_json(&json)?;
    if doc.metadata.source.is_none() {
        doc.metadata.source = Some(path.display().to_string());
    }
    Ok(doc)
}

/// Audit a document stored as loader JSON.
pub fn audit_file<P: AsRef<Path>>(path: P, options: &AuditOptions) -> Result<AuditReport> {
    let doc = load_document(path)?;
    Ok(audit(doc, options))
}

/// Builder for auditing documents.
///
/// # Example
///
/// ```no_run
/// use gostlint::{Auditor, JsonFormat};
///
/// let report = Auditor::new()
///     .whole_document()
///     .without_formatting()
///     .audit_file("thesis.json")?;
/// println!("{}", gostlint::render::to_json(&report, JsonFormat::Pretty)?);
/// # Ok::<(), gostlint::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Auditor {
    options: AuditOptions,
}

impl Auditor {
    /// Create a new auditor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an auditor from existing options.
    pub fn with_options(options: AuditOptions) -> Self {
        Self { options }
    }

    /// Look for headers after the first part title, not just in the introduction.
    pub fn whole_document(mut self) -> Self {
        self.options = self.options.whole_document();
        self
    }

    /// Admit isolated headers.
    pub fn with_isolated_headers(mut self) -> Self {
        self.options = self.options.with_isolated_headers(true);
        self
    }

    /// Skip formatting checks.
    pub fn without_formatting(mut self) -> Self {
        self.options = self.options.with_formatting(false);
        self
    }

    /// Set formatting rules.
    pub fn with_format_rules(mut self, rules: FormatRules) -> Self {
        self.options = self.options.with_format_rules(rules);
        self
    }

    /// Run structure analysis only.
    pub fn structure_only(mut self) -> Self {
        self.options = self.options.structure_only();
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Get the options.
    pub fn options(&self) -> &AuditOptions {
        &self.options
    }

    /// Audit a document.
    pub fn audit(&self, doc: Document) -> AuditReport {
        audit(doc, &self.options)
    }

    /// Audit a document given as loader JSON.
    pub fn audit_json(&self, json: &str) -> Result<AuditReport> {
        let doc = Document::from_json(json)?;
        Ok(self.audit(doc))
    }

    /// Audit a loader JSON file.
    pub fn audit_file<P: AsRef<Path>>(&self, path: P) -> Result<AuditReport> {
        audit_file(path, &self.options)
    }

    /// Audit several files; results keep the input order.
    pub fn audit_files<P>(&self, paths: &[P]) -> Vec<Result<AuditReport>>
    where
        P: AsRef<Path> + Sync,
    {
        if self.options.parallel {
            paths.par_iter().map(|p| self.audit_file(p)).collect()
        } else {
            paths.iter().map(|p| self.audit_file(p)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auditor_builder() {
        let auditor = Auditor::new()
            .whole_document()
            .without_formatting()
            .sequential();

        assert_eq!(auditor.options().header_scope, HeaderScope::Document);
        assert!(!auditor.options().check_formatting);
        assert!(!auditor.options().parallel);
    }

    #[test]
    fn test_audit_unrecognized_structure() {
        let report = audit(
            Document::from_lines(["просто", "текст"]),
            &AuditOptions::default().structure_only(),
        );
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.stats.warning_count, 1);
        assert_eq!(report.stats.paragraph_count, 2);
        assert_eq!(report.stats.node_count, 0);
    }

    #[test]
    fn test_citations_without_reference_checks() {
        let doc = Document::from_lines(["СПИСОК ИСПОЛЬЗОВАННЫХ ИСТОЧНИКОВ", "1. Просто строка"]);
        let options = AuditOptions::default()
            .with_references(false)
            .with_formatting(false);
        let report = audit(doc, &options);
        assert_eq!(report.stats.citation_count, 1);
        assert_eq!(report.stats.declaration_count, 0);
        assert_eq!(
            report.document.paragraphs[1].meta.findings[0].kind,
            FindingKind::MalformedCitation
        );
    }

    #[test]
    fn test_audit_batch_keeps_order() {
        let docs = vec![
            Document::from_lines(["ВВЕДЕНИЕ"]),
            Document::from_lines(["a", "b", "c"]),
        ];
        let reports = audit_batch(docs, &AuditOptions::default());
        assert_eq!(reports[0].stats.paragraph_count, 1);
        assert_eq!(reports[1].stats.paragraph_count, 3);
    }

    #[test]
    fn test_audit_json_rejects_garbage() {
        let result = Auditor::new().audit_json("{not json");
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
