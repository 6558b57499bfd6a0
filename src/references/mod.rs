//! Cross-reference resolution for figures, tables and sources.
//!
//! Every paragraph is scanned for declarations (captions, bibliography
//! entries) and references (in-text mentions). Declarations and references
//! of the same target are then matched by key and checked for order.

pub mod scanner;

pub use scanner::{
    scan_figures, scan_source_declaration, scan_source_references, scan_tables,
};

use crate::model::{
    DottedKey, Finding, FindingKind, Hierarchy, Paragraph, PartType, StructuralElement, Target,
};
use std::collections::HashSet;

/// Counts of elements found by the resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceCounts {
    /// Declarations of all targets
    pub declarations: usize,
    /// References of all targets
    pub references: usize,
    /// Elements flagged missing
    pub missing: usize,
}

/// Scan paragraphs for structural elements and resolve them.
pub fn resolve_references(paragraphs: &mut [Paragraph], hierarchy: &Hierarchy) -> ReferenceCounts {
    let bibliography: HashSet<usize> = hierarchy
        .part(PartType::Bibliography)
        .map(|id| hierarchy.node(id).content.iter().copied().collect())
        .unwrap_or_default();

    for paragraph in paragraphs.iter_mut() {
        let elements = scan_paragraph(paragraph, bibliography.contains(&paragraph.index));
        paragraph.meta.elements.extend(elements);
    }

    let mut counts = ReferenceCounts::default();
    for target in [Target::Figure, Target::Table, Target::Source] {
        let c = resolve_target(paragraphs, target);
        counts.declarations += c.declarations;
        counts.references += c.references;
        counts.missing += c.missing;
    }

    log::debug!(
        "resolved {} declarations and {} references ({} missing)",
        counts.declarations,
        counts.references,
        counts.missing
    );
    counts
}

/// Mark bibliography entries as source declarations without resolving.
///
/// Used when reference checks are off but citations still need their
/// entries.
pub fn mark_source_declarations(paragraphs: &mut [Paragraph], hierarchy: &Hierarchy) -> usize {
    let Some(bibliography) = hierarchy.part(PartType::Bibliography) else {
        return 0;
    };
    let mut marked = 0;
    for &index in &hierarchy.node(bibliography).content {
        let Some(paragraph) = paragraphs.get_mut(index) else {
            continue;
        };
        if let Some(declaration) = scan_source_declaration(&paragraph.text, index) {
            paragraph.meta.elements.push(declaration);
            marked += 1;
        }
    }
    marked
}

/// Run every scanner over one paragraph.
pub fn scan_paragraph(paragraph: &Paragraph, in_bibliography: bool) -> Vec<StructuralElement> {
    let text = &paragraph.text;
    let mut elements = scan_figures(text, paragraph.index);
    elements.extend(scan_tables(text, paragraph.index));
    elements.extend(scan_source_references(text, paragraph.index));
    if in_bibliography {
        elements.extend(scan_source_declaration(text, paragraph.index));
    }
    elements
}

/// Position of an element: (paragraph, slot in its element list).
type Slot = (usize, usize);

fn collect(paragraphs: &[Paragraph], target: Target) -> (Vec<(Slot, DottedKey)>, Vec<(Slot, DottedKey)>) {
    let mut declarations = Vec::new();
    let mut references = Vec::new();
    for p in paragraphs {
        for (slot, e) in p.meta.elements.iter().enumerate() {
            if e.kind.target() != target {
                continue;
            }
            let entry = ((p.index, slot), e.key.clone());
            if e.kind.is_declaration() {
                declarations.push(entry);
            } else {
                references.push(entry);
            }
        }
    }
    (declarations, references)
}

fn resolve_target(paragraphs: &mut [Paragraph], target: Target) -> ReferenceCounts {
    let (declarations, references) = collect(paragraphs, target);
    let ordered = target != Target::Source;
    let mut missing = 0;

    let declared: HashSet<&DottedKey> = declarations.iter().map(|(_, k)| k).collect();
    for ((p, slot), key) in &references {
        if declared.contains(key) {
            continue;
        }
        missing += 1;
        paragraphs[*p].meta.elements[*slot].missing = true;
        paragraphs[*p].add_finding(Finding::error(FindingKind::MissingDeclaration {
            target,
            key: key.clone(),
        }));
    }

    if ordered {
        for pair in declarations.windows(2) {
            let (_, previous) = &pair[0];
            let ((p, _), key) = &pair[1];
            if key <= previous {
                paragraphs[*p].add_finding(Finding::error(FindingKind::NumberingOrder {
                    target,
                    key: key.clone(),
                    previous: previous.clone(),
                }));
            }
        }
    }

    for ((p, slot), key) in &declarations {
        let first_reference = references.iter().find(|(_, k)| k == key);
        match first_reference {
            None => {
                missing += 1;
                paragraphs[*p].meta.elements[*slot].missing = true;
                paragraphs[*p].add_finding(Finding::warning(FindingKind::MissingReference {
                    target,
                    key: key.clone(),
                }));
            }
            Some(((reference, _), _)) if ordered && reference >= p => {
                paragraphs[*reference].add_finding(Finding::error(
                    FindingKind::ReferenceAfterDeclaration {
                        target,
                        key: key.clone(),
                    },
                ));
            }
            Some(_) => {}
        }
    }

    ReferenceCounts {
        declarations: declarations.len(),
        references: references.len(),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Document, ElementKind, NodeId};

    fn resolve(lines: &[&str]) -> Document {
        let mut doc = Document::from_lines(lines.iter().copied());
        let hierarchy = Hierarchy::new();
        resolve_references(&mut doc.paragraphs, &hierarchy);
        doc
    }

    fn findings(doc: &Document, index: usize) -> Vec<FindingKind> {
        doc.paragraphs[index]
            .meta
            .findings
            .iter()
            .map(|f| f.kind.clone())
            .collect()
    }

    #[test]
    fn test_reference_before_declaration() {
        let doc = resolve(&["см. рис. 3", "Рисунок 3 – Схема"]);
        let reference = &doc.paragraphs[0].meta.elements[0];
        assert_eq!(reference.kind, ElementKind::FigureReference);
        assert!(!reference.missing);
        assert!(!doc.paragraphs[1].meta.elements[0].missing);
        assert!(findings(&doc, 0).is_empty());
        assert!(findings(&doc, 1).is_empty());
    }

    #[test]
    fn test_reference_after_declaration() {
        let doc = resolve(&["Рисунок 3 – Схема", "см. рис. 3"]);
        assert!(matches!(
            findings(&doc, 1)[..],
            [FindingKind::ReferenceAfterDeclaration { target: Target::Figure, .. }]
        ));
    }

    #[test]
    fn test_missing_both_ways() {
        let doc = resolve(&["см. таблицу 4", "Таблица 5 – Итоги"]);
        assert!(doc.paragraphs[0].meta.elements[0].missing);
        assert!(doc.paragraphs[1].meta.elements[0].missing);
        assert!(matches!(
            findings(&doc, 0)[..],
            [FindingKind::MissingDeclaration { target: Target::Table, .. }]
        ));
        assert!(matches!(
            findings(&doc, 1)[..],
            [FindingKind::MissingReference { target: Target::Table, .. }]
        ));
    }

    #[test]
    fn test_numbering_order() {
        let doc = resolve(&["рис. 2 и рис. 1", "Рисунок 2 – А", "Рисунок 1 – Б"]);
        assert!(findings(&doc, 1).is_empty());
        let order: Vec<FindingKind> = findings(&doc, 2)
            .into_iter()
            .filter(|k| matches!(k, FindingKind::NumberingOrder { .. }))
            .collect();
        assert_eq!(order.len(), 1);
    }

    #[test]
    fn test_sources_need_bibliography_node() {
        let mut doc = Document::from_lines(["Как указано в [1] и [2]", "СПИСОК", "1. Шотт"]);
        let mut hierarchy = Hierarchy::new();
        let root = hierarchy.root();
        let bib = hierarchy.add_child(root, 1, Some(PartType::Bibliography), 0);
        hierarchy.node_mut(bib).content.push(2);
        hierarchy.node_mut(root).content.push(0);
        assert_eq!(bib, NodeId(1));

        let counts = resolve_references(&mut doc.paragraphs, &hierarchy);
        assert_eq!(counts.declarations, 1);
        assert_eq!(counts.references, 2);
        assert_eq!(counts.missing, 1);

        let refs = &doc.paragraphs[0].meta.elements;
        assert!(!refs[0].missing);
        assert!(refs[1].missing);
        assert_eq!(doc.paragraphs[2].meta.elements[0].kind, ElementKind::SourceDeclaration);
    }

    #[test]
    fn test_mark_source_declarations() {
        let mut doc = Document::from_lines(["СПИСОК", "1. А", "пояснение"]);
        let mut hierarchy = Hierarchy::new();
        let root = hierarchy.root();
        let bib = hierarchy.add_child(root, 0, Some(PartType::Bibliography), 0);
        hierarchy.node_mut(bib).content.extend([1, 2]);

        assert_eq!(mark_source_declarations(&mut doc.paragraphs, &hierarchy), 1);
        assert!(doc.paragraphs[1].meta.findings.is_empty());
        assert_eq!(doc.paragraphs[1].meta.elements.len(), 1);
    }

    #[test]
    fn test_sources_skip_order_checks() {
        let mut doc = Document::from_lines(["СПИСОК", "2. Б", "1. А", "см. [1], [2]"]);
        let mut hierarchy = Hierarchy::new();
        let root = hierarchy.root();
        let bib = hierarchy.add_child(root, 0, Some(PartType::Bibliography), 0);
        hierarchy.node_mut(bib).content.extend([1, 2, 3]);

        resolve_references(&mut doc.paragraphs, &hierarchy);
        assert!(doc.paragraphs.iter().all(|p| p.meta.findings.is_empty()));
    }
}
