//! Structural elements: numbered declarations and their in-text references.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dotted numeric key such as "2.3", compared component-wise.
///
/// Ordering is lexicographic over the integer components, so a shorter key
/// sorts before a longer key with the same prefix ("2" < "2.1").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DottedKey(Vec<u32>);

impl DottedKey {
    /// Create a key from its components.
    pub fn new(components: Vec<u32>) -> Self {
        Self(components)
    }

    /// Integer components, outermost first.
    pub fn components(&self) -> &[u32] {
        &self.0
    }

    /// Number of dot-separated groups.
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl FromStr for DottedKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components = s
            .trim()
            .split('.')
            .map(|part| part.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("invalid key '{}': {}", s, e))?;
        Ok(Self(components))
    }
}

impl TryFrom<String> for DottedKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DottedKey> for String {
    fn from(key: DottedKey) -> Self {
        key.to_string()
    }
}

impl fmt::Display for DottedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// What a structural element points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Figure (рисунок)
    Figure,
    /// Table (таблица)
    Table,
    /// Bibliography source
    Source,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Figure => write!(f, "figure"),
            Target::Table => write!(f, "table"),
            Target::Source => write!(f, "source"),
        }
    }
}

/// Kind of structural element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Figure caption
    FigureDeclaration,
    /// In-text mention of a figure
    FigureReference,
    /// Table caption
    TableDeclaration,
    /// In-text mention of a table
    TableReference,
    /// Numbered bibliography entry
    SourceDeclaration,
    /// Bracketed citation of a bibliography entry
    SourceReference,
}

impl ElementKind {
    /// Declaration kind for a target.
    pub fn declaration(target: Target) -> Self {
        match target {
            Target::Figure => ElementKind::FigureDeclaration,
            Target::Table => ElementKind::TableDeclaration,
            Target::Source => ElementKind::SourceDeclaration,
        }
    }

    /// Reference kind for a target.
    pub fn reference(target: Target) -> Self {
        match target {
            Target::Figure => ElementKind::FigureReference,
            Target::Table => ElementKind::TableReference,
            Target::Source => ElementKind::SourceReference,
        }
    }

    /// The target this element kind points at.
    pub fn target(self) -> Target {
        match self {
            ElementKind::FigureDeclaration | ElementKind::FigureReference => Target::Figure,
            ElementKind::TableDeclaration | ElementKind::TableReference => Target::Table,
            ElementKind::SourceDeclaration | ElementKind::SourceReference => Target::Source,
        }
    }

    /// Check if this is a declaration kind.
    pub fn is_declaration(self) -> bool {
        matches!(
            self,
            ElementKind::FigureDeclaration
                | ElementKind::TableDeclaration
                | ElementKind::SourceDeclaration
        )
    }
}

/// A declaration or reference found in a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralElement {
    /// Element kind
    pub kind: ElementKind,

    /// Numeric key
    pub key: DottedKey,

    /// Paragraph the element was found in
    pub paragraph: usize,

    /// No counterpart (declaration for a reference, or vice versa) exists
    #[serde(default)]
    pub missing: bool,
}

impl StructuralElement {
    /// Create an element that is not (yet) flagged missing.
    pub fn new(kind: ElementKind, key: DottedKey, paragraph: usize) -> Self {
        Self {
            kind,
            key,
            paragraph,
            missing: false,
        }
    }
}
