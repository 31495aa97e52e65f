//! Error types for the stmtx-core library.

use thiserror::Error;

/// Main error type for the stmtx library.
#[derive(Error, Debug)]
pub enum StmtxError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Record store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors related to reading the source document.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to the persisted record set.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The persisted file does not start with the expected header row.
    #[error("unexpected header in {path}: expected {expected}, found {found}")]
    Header {
        path: String,
        expected: String,
        found: String,
    },

    /// Failed to move a freshly written file into place.
    #[error("failed to persist {path}: {reason}")]
    Persist { path: String, reason: String },
}

/// Result type for the stmtx library.
pub type Result<T> = std::result::Result<T, StmtxError>;
