//! Error types for the ranklab library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`RanklabError`] enum. Degenerate inputs (unseen terms, empty collections,
//! `K = 0`) are not errors anywhere in this crate; they resolve to documented
//! zero defaults. Errors are reserved for I/O, malformed corpus files, and
//! programmer mistakes such as querying an index that was never built.

use std::io;

use thiserror::Error;

/// The main error type for ranklab operations.
#[derive(Error, Debug)]
pub enum RanklabError {
    /// I/O errors (corpus files, result output).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Corpus parsing errors (malformed Cranfield files).
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Analysis errors (tokenization, filtering).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Index-related errors.
    #[error("Index error: {0}")]
    Index(String),

    /// Evaluation errors.
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with [`RanklabError`].
pub type Result<T> = std::result::Result<T, RanklabError>;

impl RanklabError {
    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        RanklabError::Corpus(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        RanklabError::Analysis(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        RanklabError::Index(msg.into())
    }

    /// Create a new evaluation error.
    pub fn evaluation<S: Into<String>>(msg: S) -> Self {
        RanklabError::Evaluation(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        RanklabError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        RanklabError::Other(format!("Invalid argument: {}", msg.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = RanklabError::index("Test index error");
        assert_eq!(error.to_string(), "Index error: Test index error");

        let error = RanklabError::corpus("Test corpus error");
        assert_eq!(error.to_string(), "Corpus error: Test corpus error");

        let error = RanklabError::analysis("Test analysis error");
        assert_eq!(error.to_string(), "Analysis error: Test analysis error");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = RanklabError::from(io_error);

        match error {
            RanklabError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
