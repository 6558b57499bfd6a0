//! Audit options and formatting rule constants.

use crate::model::{PageMargins, PageSize};
use serde::{Deserialize, Serialize};

/// Options controlling which stages run and how.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// Where the header classifier looks for headers
    pub header_scope: HeaderScope,

    /// Admit singleton header runs anywhere, not just the terminal one
    pub accept_isolated_headers: bool,

    /// Rebuild list numbers before analysis
    pub restore_numbering: bool,

    /// Run the reference resolver
    pub check_references: bool,

    /// Run the citation grammar engine
    pub check_citations: bool,

    /// Run formatting checks
    pub check_formatting: bool,

    /// Formatting constants
    pub format_rules: FormatRules,

    /// Audit batches of documents in parallel
    pub parallel: bool,
}

impl AuditOptions {
    /// Create new audit options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header scope.
    pub fn with_header_scope(mut self, scope: HeaderScope) -> Self {
        self.header_scope = scope;
        self
    }

    /// Scan the whole document body for headers.
    pub fn whole_document(mut self) -> Self {
        self.header_scope = HeaderScope::Document;
        self
    }

    /// Enable or disable isolated header acceptance.
    pub fn with_isolated_headers(mut self, accept: bool) -> Self {
        self.accept_isolated_headers = accept;
        self
    }

    /// Enable or disable numbering reconstruction.
    pub fn with_numbering(mut self, restore: bool) -> Self {
        self.restore_numbering = restore;
        self
    }

    /// Enable or disable reference checks.
    pub fn with_references(mut self, check: bool) -> Self {
        self.check_references = check;
        self
    }

    /// Enable or disable citation checks.
    pub fn with_citations(mut self, check: bool) -> Self {
        self.check_citations = check;
        self
    }

    /// Enable or disable formatting checks.
    pub fn with_formatting(mut self, check: bool) -> Self {
        self.check_formatting = check;
        self
    }

    /// Set formatting rules.
    pub fn with_format_rules(mut self, rules: FormatRules) -> Self {
        self.format_rules = rules;
        self
    }

    /// Run structure analysis only.
    pub fn structure_only(mut self) -> Self {
        self.check_references = false;
        self.check_citations = false;
        self.check_formatting = false;
        self
    }

    /// Enable or disable parallel batch processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            header_scope: HeaderScope::Introduction,
            accept_isolated_headers: false,
            restore_numbering: true,
            check_references: true,
            check_citations: true,
            check_formatting: true,
            format_rules: FormatRules::default(),
            parallel: true,
        }
    }
}

/// Paragraph range scanned for main-part headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderScope {
    /// The introduction part up to the next part title
    #[default]
    Introduction,
    /// Every paragraph after the first part title
    Document,
}

/// Formatting constants the document is checked against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatRules {
    /// Required font family
    pub font_name: String,

    /// Required font size in points
    pub font_size: f32,

    /// Required line spacing multiplier
    pub line_spacing: f32,

    /// Body paragraphs must have a positive first-line indent
    pub require_indent: bool,

    /// Required margins in centimetres
    pub margins: PageMargins,

    /// Required page size in centimetres
    pub page_size: PageSize,

    /// Sections after the first must show page numbers
    pub number_pages: bool,
}

impl FormatRules {
    /// Load rules from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for FormatRules {
    fn default() -> Self {
        Self {
            font_name: "Times New Roman".to_string(),
            font_size: 14.0,
            line_spacing: 1.15,
            require_indent: true,
            margins: PageMargins::new(2.0, 1.0, 2.0, 3.0),
            page_size: PageSize::A4,
            number_pages: true,
        }
    }
}
