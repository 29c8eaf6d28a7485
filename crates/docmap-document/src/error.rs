//! Error types for document parsing.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when parsing a document from disk.
///
/// Parsing itself is total; only reading the file or dispatching on its
/// extension can fail.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The file extension is not a supported document type.
    #[error("unsupported file type: {path}")]
    UnsupportedFileType {
        /// The path with the unsupported extension.
        path: PathBuf,
    },
}
