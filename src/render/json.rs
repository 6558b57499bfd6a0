//! JSON rendering for audit reports.

use crate::error::{Error, Result};
use crate::report::AuditReport;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an audit report to JSON.
pub fn to_json(report: &AuditReport, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(report),
        JsonFormat::Compact => serde_json::to_string(report),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{audit, AuditOptions, Document};

    fn sample() -> AuditReport {
        let doc = Document::from_lines(["ВВЕДЕНИЕ", "Текст", "СПИСОК ИСПОЛЬЗОВАННЫХ ИСТОЧНИКОВ", "1. Строка"]);
        audit(doc, &AuditOptions::default())
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"hierarchy\""));
        assert!(json.contains("\"malformed_citation\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["stats"]["paragraph_count"], 4);
    }
}
