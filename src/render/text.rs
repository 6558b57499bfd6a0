//! Plain text rendering for audit reports.

use std::fmt::Write;

use crate::error::{Error, Result};
use crate::model::{Hierarchy, Paragraph, Severity};
use crate::report::AuditReport;

use super::TextOptions;

/// Convert an audit report to a plain-text listing.
pub fn to_text(report: &AuditReport, options: &TextOptions) -> Result<String> {
    let mut output = String::new();
    write_text(&mut output, report, options)
        .map_err(|e| Error::Render(format!("text rendering error: {}", e)))?;
    Ok(output.trim_end().to_string())
}

fn write_text(out: &mut String, report: &AuditReport, options: &TextOptions) -> std::fmt::Result {
    let paragraphs = &report.document.paragraphs;

    if options.outline {
        writeln!(out, "Outline:")?;
        write_outline(out, &report.hierarchy, paragraphs, options.excerpt_width)?;
        writeln!(out)?;
    }

    if options.citations {
        writeln!(out, "Bibliography:")?;
        for p in paragraphs {
            if let Some(ref citation) = p.meta.citation {
                let mark = if citation.record.is_recognized() { ' ' } else { '?' };
                writeln!(out, "{} {:>4}  {}", mark, p.index + 1, citation.canonical)?;
            }
        }
        writeln!(out)?;
    }

    if options.findings {
        let listed: Vec<_> = report
            .all_findings()
            .into_iter()
            .filter(|l| l.finding.severity >= options.min_severity)
            .collect();
        writeln!(
            out,
            "Findings: {} errors, {} warnings",
            report.stats.error_count, report.stats.warning_count
        )?;
        for located in listed {
            let severity = match located.finding.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            match located.paragraph {
                Some(i) => writeln!(
                    out,
                    "  paragraph {}: {}: {}  \"{}\"",
                    i + 1,
                    severity,
                    located.finding,
                    excerpt(&paragraphs[i], options.excerpt_width)
                )?,
                None => writeln!(out, "  document: {}: {}", severity, located.finding)?,
            }
        }
    }

    Ok(())
}

fn write_outline(
    out: &mut String,
    hierarchy: &Hierarchy,
    paragraphs: &[Paragraph],
    width: usize,
) -> std::fmt::Result {
    for (id, depth) in hierarchy.walk() {
        let node = hierarchy.node(id);
        let Some(header) = node.header else { continue };
        let indent = "  ".repeat(depth.saturating_sub(1));
        let title = paragraphs
            .get(header)
            .map(|p| excerpt(p, width))
            .unwrap_or_default();
        match node.part {
            Some(part) => writeln!(out, "{}{} [{}]", indent, title, part)?,
            None => writeln!(out, "{}{}", indent, title)?,
        }
    }
    Ok(())
}

/// Paragraph text shortened to `width` characters (0 = no limit).
pub fn excerpt(paragraph: &Paragraph, width: usize) -> String {
    let text = paragraph.pure_text();
    if width == 0 || text.chars().count() <= width {
        return text;
    }
    let mut short: String = text.chars().take(width.saturating_sub(3)).collect();
    short.push_str("...");
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{audit, AuditOptions, Document};

    fn sample() -> AuditReport {
        let doc = Document::from_lines([
            "ВВЕДЕНИЕ",
            "Текст введения",
            "1 Обзор",
            "1.1 Цели",
            "Текст",
            "СПИСОК ИСПОЛЬЗОВАННЫХ ИСТОЧНИКОВ",
            "1. Шотт, А.В. Курс лекций по частной хирургии / А.В. Шотт, В.А. Шотт. – Минск : Асар, 2004. – 525 с.",
        ]);
        audit(doc, &AuditOptions::default().with_formatting(false))
    }

    #[test]
    fn test_outline() {
        let options = TextOptions::new().with_outline(true).with_findings(false);
        let text = to_text(&sample(), &options).unwrap();
        assert!(text.contains("ВВЕДЕНИЕ [introduction]"));
        assert!(text.contains("\n1 Обзор\n  1.1 Цели\n"));
    }

    #[test]
    fn test_findings_listing() {
        let text = to_text(&sample(), &TextOptions::default()).unwrap();
        assert!(text.starts_with("Findings: 0 errors, 1 warnings"));
        assert!(text.contains("paragraph 7: warning: Source 1 is never referenced"));
    }

    #[test]
    fn test_errors_only_and_citations() {
        let options = TextOptions::new().errors_only().with_citations(true);
        let text = to_text(&sample(), &options).unwrap();
        assert!(text.contains("     7  Шотт, А.В. Курс лекций"));
        assert!(!text.contains("warning:"));
    }

    #[test]
    fn test_excerpt() {
        let p = Paragraph::new(0, "abcdefghij");
        assert_eq!(excerpt(&p, 0), "abcdefghij");
        assert_eq!(excerpt(&p, 6), "abc...");
    }
}
