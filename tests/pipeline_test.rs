//! End-to-end tests of the audit pipeline.

use gostlint::model::NumberingDefinition;
use gostlint::{
    audit, audit_batch, load_document, AuditOptions, Auditor, Document, FindingKind, Paragraph,
    ParagraphStyle, PartType,
};
use std::io::Write;

const THESIS: &[&str] = &[
    "Белорусский государственный университет",
    "РЕФЕРАТ",
    "Дипломная работа, 50 с.",
    "СОДЕРЖАНИЕ",
    "Введение 3",
    "ВВЕДЕНИЕ",
    "Актуальность темы подтверждается работами [1] и [2].",
    "1 Обзор литературы",
    "1.1 Постановка задачи",
    "Как видно на рисунке 1.1, схема проста.",
    "Рисунок 1.1 – Схема",
    "Данные приведены в таблице 1.",
    "Таблица 1 – Результаты",
    "2 Методы",
    "Текст",
    "ЗАКЛЮЧЕНИЕ",
    "Итоги",
    "СПИСОК ИСПОЛЬЗОВАННЫХ ИСТОЧНИКОВ",
    "1. Шотт, А.В. Курс лекций по частной хирургии / А.В. Шотт, В.А. Шотт. – Минск : Асар, 2004. – 525 с.",
    "2. Культурология : учеб. пособие для вузов / С.В. Лапина [и др.] ; под общ. ред. С.В. Лапиной. – 2-е изд. – Минск : ТетраСистемс, 2004. – 495 с.",
];

fn options() -> AuditOptions {
    AuditOptions::default().with_formatting(false)
}

#[test]
fn test_clean_thesis_has_no_findings() {
    let report = audit(Document::from_lines(THESIS.iter().copied()), &options());

    assert_eq!(report.stats.finding_count(), 0, "{:?}", report.all_findings());
    assert_eq!(report.stats.citation_count, 2);
    assert_eq!(report.stats.recognized_citations, 2);
    assert_eq!(report.stats.declaration_count, 4);

    let headers: Vec<usize> = report.headers.iter().map(|h| h.paragraph).collect();
    assert_eq!(headers, vec![7, 8, 13]);
}

#[test]
fn test_hierarchy_covers_every_paragraph_once() {
    let report = audit(Document::from_lines(THESIS.iter().copied()), &options());
    let h = &report.hierarchy;
    assert_eq!(
        h.subtree_paragraphs(h.root()),
        (0..THESIS.len()).collect::<Vec<_>>()
    );
    assert!(report.document.paragraphs.iter().all(|p| p.meta.node.is_some()));

    let chapter = h.node(h.root()).children[3];
    assert_eq!(h.node(chapter).header, Some(7));
    assert_eq!(h.node(chapter).children.len(), 1);

    let bib = h.part(PartType::Bibliography).unwrap();
    assert_eq!(h.node(bib).content, vec![18, 19]);
}

#[test]
fn test_whole_document_scope_folds_entries_into_bibliography() {
    let report = audit(
        Document::from_lines(THESIS.iter().copied()),
        &options().whole_document(),
    );
    let h = &report.hierarchy;
    let bib = h.part(PartType::Bibliography).unwrap();
    assert_eq!(h.node(bib).content, vec![18, 19]);
    assert!(h.node(bib).children.is_empty());
    assert!(!report.document.paragraphs[19].is_header());
    assert_eq!(
        h.subtree_paragraphs(h.root()),
        (0..THESIS.len()).collect::<Vec<_>>()
    );
    assert!(report.document.paragraphs[19].meta.citation.is_some());
}

#[test]
fn test_numbering_restored_before_analysis() {
    let mut doc = Document::new();
    doc.add_numbering(NumberingDefinition::new(1, &["%1", "%1.%2"]));
    doc.add_numbering(NumberingDefinition::new(2, &["%1."]));

    doc.push(Paragraph::new(0, "ВВЕДЕНИЕ"));
    doc.push(Paragraph::new(0, "Текст"));
    doc.push(Paragraph::with_style(0, "Обзор", ParagraphStyle::list_item(1, 0)));
    doc.push(Paragraph::with_style(0, "Цели", ParagraphStyle::list_item(1, 1)));
    doc.push(Paragraph::new(0, "См. источник [1]."));
    doc.push(Paragraph::new(0, "СПИСОК ИСПОЛЬЗОВАННЫХ ИСТОЧНИКОВ"));
    doc.push(Paragraph::with_style(
        0,
        "Шотт, А.В. Курс лекций по частной хирургии / А.В. Шотт, В.А. Шотт. – Минск : Асар, 2004. – 525 с.",
        ParagraphStyle::list_item(2, 0),
    ));

    let report = audit(doc, &options());
    let paragraphs = &report.document.paragraphs;
    assert_eq!(paragraphs[2].text, "1 Обзор");
    assert_eq!(paragraphs[3].text, "1.1 Цели");
    assert_eq!(paragraphs[6].number.as_deref(), Some("1."));
    assert_eq!(report.headers.len(), 2);
    assert_eq!(report.stats.recognized_citations, 1);
    assert_eq!(report.stats.finding_count(), 0);
}

#[test]
fn test_citation_deviation_surfaces_on_entry() {
    let mut lines: Vec<&str> = THESIS.to_vec();
    lines[18] = "1. Шотт, А.В. Курс лекций по частной хирургии / А.В. Шотт, В.А. Шотт - Минск: Асар, 2004 - 525 с";
    let report = audit(Document::from_lines(lines), &options());

    let findings = &report.document.paragraphs[18].meta.findings;
    assert_eq!(findings.len(), 1);
    match &findings[0].kind {
        FindingKind::CitationFormat { expected } => assert_eq!(expected, &THESIS[18][3..]),
        other => panic!("unexpected finding: {:?}", other),
    }
}

#[test]
fn test_load_document_from_json_file() {
    let json = r#"{
        "paragraphs": [
            { "text": "ВВЕДЕНИЕ", "index": 7 },
            { "text": "Текст", "style": { "font_name": "Arial", "font_size": 14.0, "first_line_indent": 1.25, "line_spacing": 1.15 } }
        ],
        "sections": [
            { "page_size": { "width": 21.0, "height": 29.7 }, "margins": { "top": 2.0, "right": 1.0, "bottom": 2.0, "left": 3.0 } }
        ]
    }"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let doc = load_document(file.path()).unwrap();
    assert_eq!(doc.paragraphs[0].index, 0);
    assert_eq!(doc.paragraphs[1].index, 1);
    assert!(doc.metadata.source.is_some());

    let report = Auditor::new().audit_file(file.path()).unwrap();
    let findings = &report.document.paragraphs[1].meta.findings;
    assert!(matches!(findings[..], [ref f] if matches!(f.kind, FindingKind::FontName { .. })));
    assert!(report.findings.is_empty());
}

#[test]
fn test_load_document_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_document(dir.path().join("absent.json"));
    assert!(matches!(result, Err(gostlint::Error::Io(_))));
}

#[test]
fn test_batch_matches_single_audits() {
    let docs: Vec<Document> = (0..4)
        .map(|_| Document::from_lines(THESIS.iter().copied()))
        .collect();
    let reports = audit_batch(docs, &options());
    assert_eq!(reports.len(), 4);
    assert!(reports.iter().all(|r| r.stats.finding_count() == 0));
}
