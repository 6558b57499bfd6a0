//! Formatting checks: fonts, spacing and indents of paragraphs, page
//! geometry and numbering of sections.

use crate::model::{
    Alignment, Document, Finding, FindingKind, NumberingDefinition, Paragraph, Section,
};
use crate::options::FormatRules;

const TOLERANCE: f32 = 0.01;

fn differs(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() > TOLERANCE
}

/// Check every paragraph and section of a document.
///
/// Paragraph findings are attached to their paragraphs; section findings
/// are returned.
pub fn check_formatting(doc: &mut Document, rules: &FormatRules) -> Vec<Finding> {
    let Document {
        paragraphs,
        numberings,
        sections,
        ..
    } = doc;

    let mut flagged = 0;
    for paragraph in paragraphs.iter_mut() {
        let findings = check_paragraph(paragraph, numberings, rules);
        if !findings.is_empty() {
            flagged += 1;
        }
        paragraph.meta.findings.extend(findings);
    }

    let document_findings = check_sections(sections, rules);
    log::debug!(
        "formatting: {} paragraphs flagged, {} section findings",
        flagged,
        document_findings.len()
    );
    document_findings
}

/// First-line indent after applying the list level override.
pub fn effective_indent(paragraph: &Paragraph, numberings: &[NumberingDefinition]) -> f32 {
    let override_indent = paragraph.style.numbering.and_then(|r| {
        numberings
            .iter()
            .find(|d| d.id == r.id)
            .and_then(|d| d.level(r.level))
            .and_then(|l| l.indent)
    });
    override_indent
        .or(paragraph.style.first_line_indent)
        .unwrap_or(0.0)
}

/// Check one paragraph. Empty paragraphs and unresolved style values pass.
pub fn check_paragraph(
    paragraph: &Paragraph,
    numberings: &[NumberingDefinition],
    rules: &FormatRules,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    if paragraph.is_empty() {
        return findings;
    }
    let style = &paragraph.style;
    let header = paragraph.is_header();
    let caption = paragraph.is_caption();

    if let Some(size) = style.font_size {
        let allowed = (caption && size < rules.font_size) || (header && size > rules.font_size);
        if differs(size, rules.font_size) && !allowed {
            findings.push(Finding::error(FindingKind::FontSize { actual: size }));
        }
    }

    if let Some(ref name) = style.font_name {
        if name != &rules.font_name {
            findings.push(Finding::error(FindingKind::FontName {
                actual: name.clone(),
                expected: rules.font_name.clone(),
            }));
        }
    }

    let indent = effective_indent(paragraph, numberings);
    let indented = indent.abs() > TOLERANCE;
    let missing = rules.require_indent && !indented && !header && !caption;
    let centered = indented && style.alignment == Alignment::Center;
    if missing || centered {
        findings.push(Finding::error(FindingKind::FirstLineIndent { actual: indent }));
    }

    if let Some(spacing) = style.line_spacing {
        if differs(spacing, rules.line_spacing) && !header {
            findings.push(Finding::error(FindingKind::LineSpacing { actual: spacing }));
        }
    }

    findings
}

/// Check page geometry and page numbering of every section.
pub fn check_sections(sections: &[Section], rules: &FormatRules) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (i, section) in sections.iter().enumerate() {
        let number = i + 1;
        if !section.margins.approx_eq(&rules.margins) {
            findings.push(Finding::error(FindingKind::PageMargins {
                section: number,
                actual: section.margins.to_string(),
                expected: rules.margins.to_string(),
            }));
        }
        if !section.page_size.approx_eq(&rules.page_size) {
            findings.push(Finding::error(FindingKind::PageSize { section: number }));
        }
        if i == 0 && section.page_numbers {
            findings.push(Finding::error(FindingKind::TitlePageNumbered));
        }
        if i > 0 && rules.number_pages && !section.page_numbers {
            findings.push(Finding::error(FindingKind::PagesNotNumbered { section: number }));
        }
    }
    findings
}
