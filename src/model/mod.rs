//! Document model types for thesis auditing.
//!
//! This module defines the representation shared by every analysis stage:
//! the loaded document, its paragraphs with their annotations, the
//! hierarchy arena, structural elements, parsed citations and findings.

mod citation;
mod document;
mod element;
mod finding;
mod hierarchy;
mod numbering;
mod paragraph;
mod section;

pub use citation::{
    Access, Book, Citation, CitationRecord, Editor, Extent, Language, Person, Publisher, WebPage,
    WebSite,
};
pub use document::{Document, Metadata};
pub use element::{DottedKey, ElementKind, StructuralElement, Target};
pub use finding::{Category, Finding, FindingKind, Severity};
pub use hierarchy::{Hierarchy, Node, NodeId, PartType};
pub use numbering::{NumberStyle, NumberingDefinition, NumberingLevel, MAX_NUMBERING_LEVELS};
pub use paragraph::{
    Alignment, Annotation, NumberingRef, Paragraph, ParagraphStyle, MAX_OUTLINE_LEVEL,
    PAGE_BREAK_MARKER,
};
pub use section::{PageMargins, PageSize, Section};
