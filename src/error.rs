//! Error types for gostlint library.

use std::io;
use thiserror::Error;

/// Result type alias for gostlint operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors at the I/O boundary. Analysis itself never fails; problems in
/// the audited document are reported as findings.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Document or rules JSON could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is structurally unusable.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Error during report rendering (text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDocument("numbering definition 3 has 12 levels".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid document: numbering definition 3 has 12 levels"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("x").unwrap_err();
        let err: Error = json_err.into();
        assert!(err.to_string().starts_with("JSON error"));
    }
}
