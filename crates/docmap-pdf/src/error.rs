//! Error types for PDF structure derivation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when deriving structure from a PDF.
///
/// Only a container that cannot be opened or decoded is a hard failure;
/// per-page extraction errors are recovered locally by the deriver.
#[derive(Debug, Error)]
pub enum PdfError {
    /// The PDF container could not be opened or decoded.
    #[error("failed to open PDF {path}: {source}")]
    Open {
        /// Path to the file that could not be opened.
        path: PathBuf,
        /// Underlying container error.
        source: lopdf::Error,
    },

    /// Text extraction failed for a single page.
    #[error("failed to extract text from page {page}: {source}")]
    PageText {
        /// The 1-based page number.
        page: usize,
        /// Underlying extraction error.
        source: lopdf::Error,
    },

    /// A page number outside the document's page range was requested.
    #[error("page {page} is out of range")]
    PageOutOfRange {
        /// The 1-based page number that was requested.
        page: usize,
    },
}
