//! Document structure inference.
//!
//! Runs, in order: numbering reconstruction, part segmentation, header
//! classification and hierarchy assembly.

pub mod headers;
pub mod hierarchy;
pub mod numbering;
pub mod parts;

pub use headers::{classify_headers, Header, HeaderMarker};
pub use hierarchy::{build_hierarchy, HierarchyBuilder, Token, Transition};
pub use numbering::restore_numbering;
pub use parts::{part_for_title, segment, DocumentParts, PartRange};

use crate::model::{Document, Hierarchy};
use crate::options::AuditOptions;

/// Result of structure inference.
#[derive(Debug, Clone)]
pub struct Structure {
    /// Top-level parts (introduction already split from the main part)
    pub parts: DocumentParts,

    /// Accepted main-part headers
    pub headers: Vec<Header>,

    /// Document tree
    pub hierarchy: Hierarchy,
}

/// Infer the structure of a document, annotating its paragraphs.
pub fn analyze(doc: &mut Document, options: &AuditOptions) -> Structure {
    if options.restore_numbering {
        restore_numbering(doc);
    }

    let mut parts = segment(&doc.paragraphs);
    let headers = classify_headers(&mut doc.paragraphs, &parts, options);
    if let Some(first) = headers.first() {
        parts.split_introduction(first.paragraph);
    }

    let tokens = hierarchy::tokens(&parts, &headers);
    let hierarchy = build_hierarchy(&mut doc.paragraphs, &tokens);

    Structure {
        parts,
        headers,
        hierarchy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PartType;

    #[test]
    fn test_analyze_thesis_outline() {
        let mut doc = Document::from_lines([
            "Белорусский государственный университет",
            "СОДЕРЖАНИЕ",
            "Введение 3",
            "ВВЕДЕНИЕ",
            "Актуальность темы",
            "1 Обзор литературы",
            "1.1 Постановка задачи",
            "Текст",
            "ЗАКЛЮЧЕНИЕ",
            "Итоги",
            "СПИСОК ИСПОЛЬЗОВАННЫХ ИСТОЧНИКОВ",
            "1. Шотт, А.В. Курс",
        ]);
        let s = analyze(&mut doc, &AuditOptions::default());

        assert_eq!(s.headers.len(), 2);
        assert_eq!(s.parts.introduction.as_ref().map(|p| p.range()), Some(3..5));
        assert_eq!(s.parts.main.as_ref().map(|p| p.range()), Some(5..8));

        let h = &s.hierarchy;
        let top: Vec<Option<PartType>> = h
            .node(h.root())
            .children
            .iter()
            .map(|id| h.node(*id).part)
            .collect();
        assert_eq!(
            top,
            vec![
                Some(PartType::Toc),
                Some(PartType::Introduction),
                None,
                Some(PartType::Conclusion),
                Some(PartType::Bibliography)
            ]
        );
        assert_eq!(h.subtree_paragraphs(h.root()), (0..12).collect::<Vec<_>>());

        let bib = h.part(PartType::Bibliography).unwrap();
        assert_eq!(h.node(bib).content, vec![11]);
    }

    #[test]
    fn test_analyze_unstructured() {
        let mut doc = Document::from_lines(["просто", "текст"]);
        let s = analyze(&mut doc, &AuditOptions::default());
        assert!(!s.parts.is_recognized());
        assert!(s.headers.is_empty());
        assert_eq!(s.hierarchy.node(s.hierarchy.root()).content, vec![0, 1]);
    }
}
