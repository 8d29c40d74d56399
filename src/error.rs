//! Error types for the form collector and the document renderer.
//!
//! Cell contents are never an error source: anything a user types into a
//! table is accepted. Errors only arise from addressing (unknown section,
//! stale row index), metadata parsing and document packaging.

use thiserror::Error;

/// Errors raised while editing a [`ReportForm`](crate::form::ReportForm).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown table section `{0}`")]
    UnknownSection(String),

    #[error("unknown text field `{0}`")]
    UnknownField(String),

    #[error("row {index} is out of range for {section} ({len} rows)")]
    RowOutOfRange {
        section: &'static str,
        index: usize,
        len: usize,
    },

    #[error("invalid reporting month `{0}` (expected YYYY-MM)")]
    InvalidMonth(String),

    #[error("unsupported image `{0}` (accepted: png, jpg, jpeg)")]
    UnsupportedImage(String),
}

/// Errors raised while serializing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to package document: {0}")]
    Package(String),

    #[error("failed to encode document model: {0}")]
    Encode(#[from] serde_json::Error),
}
