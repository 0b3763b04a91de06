//! Error types for the sanitizer.
//!
//! The rewriting core has no recoverable-error taxonomy: every transform is
//! total over strings. All failures come from the I/O edges and abort the
//! run on first occurrence.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the sanitizer library.
#[derive(Debug, Error)]
pub enum SanitizeError {
    /// Input root does not exist.
    #[error("Input directory not found: {}", .0.display())]
    InputRootNotFound(PathBuf),

    /// Input root exists but is not a directory.
    #[error("Input path is not a directory: {}", .0.display())]
    InputRootNotADirectory(PathBuf),

    /// Reading a document failed.
    #[error("Failed to read {}: {source}", path.display())]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a sanitized document failed.
    #[error("Failed to write {}: {source}", path.display())]
    WriteDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking the input tree failed.
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for sanitizer operations.
pub type Result<T> = std::result::Result<T, SanitizeError>;
