//! Core data types for the sanitizer.

/// One input document.
///
/// A document's identity, for override dispatch, is its path relative to
/// the input root with `/` separators. The raw text is read-only: every
/// transform produces a new string, and nothing outlives the processing of
/// a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path relative to the input root, `/`-separated.
    pub relative_path: String,

    /// Text as the renderer produced it.
    pub raw_text: String,
}

impl Document {
    /// Create a document from its relative path and raw text.
    #[must_use]
    pub fn new(relative_path: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            raw_text: raw_text.into(),
        }
    }
}
