//! Error types for the pdfsieve library.

use std::io;
use thiserror::Error;

use crate::model::AnalysisReport;

/// Result type alias for pdfsieve operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during extraction and analysis.
///
/// Every failure in this crate is a value returned to the caller.
/// Validation errors surface before any processing starts; per-document
/// errors inside a batch are captured on the report instead of aborting
/// peer documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The byte stream cannot be parsed as a PDF: corrupt structure,
    /// encrypted without a usable key, or zero extractable text.
    #[error("unreadable PDF: {0}")]
    UnreadablePdf(String),

    /// Single-document input exceeds the page limit.
    #[error("document has {pages} pages, limit is {limit}")]
    PageLimitExceeded { pages: u32, limit: u32 },

    /// Batch document count outside the accepted range.
    #[error("batch has {0} documents, expected between 3 and 10")]
    InvalidBatchSize(usize),

    /// Persona or job-to-be-done text is blank.
    #[error("persona and job-to-be-done must both be non-empty")]
    MissingPersonaInput,

    /// One document exceeded its processing allowance inside a batch.
    #[error("document '{document}' exceeded its {budget_secs:.1}s budget")]
    PerDocumentTimeout { document: String, budget_secs: f64 },

    /// The whole batch exceeded its wall-clock budget. Carries any
    /// partial report produced before the overrun, marked incomplete.
    #[error("batch budget of {budget_secs:.1}s exceeded")]
    BudgetExceeded {
        budget_secs: f64,
        partial: Option<Box<AnalysisReport>>,
    },
}

impl Error {
    /// Short machine-readable name used when a per-document failure is
    /// attached to a batch report.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Io(_) => "Io",
            Error::UnreadablePdf(_) => "UnreadablePdf",
            Error::PageLimitExceeded { .. } => "PageLimitExceeded",
            Error::InvalidBatchSize(_) => "InvalidBatchSize",
            Error::MissingPersonaInput => "MissingPersonaInput",
            Error::PerDocumentTimeout { .. } => "PerDocumentTimeout",
            Error::BudgetExceeded { .. } => "BudgetExceeded",
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => {
                Error::UnreadablePdf("document is encrypted".to_string())
            }
            _ => Error::UnreadablePdf(err.to_string()),
        }
    }
}

impl From<pdf_extract::OutputError> for Error {
    fn from(err: pdf_extract::OutputError) -> Self {
        Error::UnreadablePdf(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidBatchSize(2);
        assert_eq!(
            err.to_string(),
            "batch has 2 documents, expected between 3 and 10"
        );

        let err = Error::PageLimitExceeded {
            pages: 60,
            limit: 50,
        };
        assert_eq!(err.to_string(), "document has 60 pages, limit is 50");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::MissingPersonaInput.kind(), "MissingPersonaInput");
        assert_eq!(
            Error::UnreadablePdf("bad xref".into()).kind(),
            "UnreadablePdf"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
