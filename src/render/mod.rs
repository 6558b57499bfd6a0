//! Rendering of audit reports.

mod json;
mod options;
mod text;

pub use json::{to_json, JsonFormat};
pub use options::TextOptions;
pub use text::{excerpt, to_text};
