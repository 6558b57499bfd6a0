//! Text report options.

use crate::model::Severity;

/// Options for the plain-text report.
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Include the document outline
    pub outline: bool,

    /// Include the findings listing
    pub findings: bool,

    /// Include canonical forms of bibliography entries
    pub citations: bool,

    /// Lowest severity listed
    pub min_severity: Severity,

    /// Truncate paragraph excerpts to this many characters (0 = no limit)
    pub excerpt_width: usize,
}

impl TextOptions {
    /// Create new text options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the outline.
    pub fn with_outline(mut self, outline: bool) -> Self {
        self.outline = outline;
        self
    }

    /// Enable or disable the findings listing.
    pub fn with_findings(mut self, findings: bool) -> Self {
        self.findings = findings;
        self
    }

    /// Enable or disable the citation listing.
    pub fn with_citations(mut self, citations: bool) -> Self {
        self.citations = citations;
        self
    }

    /// List errors only.
    pub fn errors_only(mut self) -> Self {
        self.min_severity = Severity::Error;
        self
    }

    /// Set the excerpt width.
    pub fn with_excerpt_width(mut self, width: usize) -> Self {
        self.excerpt_width = width;
        self
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            outline: false,
            findings: true,
            citations: false,
            min_severity: Severity::Warning,
            excerpt_width: 60,
        }
    }
}
