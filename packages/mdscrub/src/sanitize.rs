//! Per-document composition of the three rewriting passes.

use crate::document::DocumentSanitizer;
use crate::line::LineSanitizer;
use crate::overrides::OverrideTable;

/// The full per-document rewriting pipeline.
///
/// Whole-document rules run exactly once, in order, before the text is
/// split into physical lines; each line is rewritten (code lines pass
/// through untouched); the override for this document's path, if any, is
/// the very last operation.
pub struct Sanitizer {
    document: DocumentSanitizer,
    line: LineSanitizer,
    overrides: OverrideTable,
}

impl Sanitizer {
    /// Create a sanitizer with the default rules and override table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(
            DocumentSanitizer::new(),
            LineSanitizer::new(),
            OverrideTable::new(),
        )
    }

    /// Create a sanitizer from caller-supplied parts.
    #[must_use]
    pub fn with_parts(
        document: DocumentSanitizer,
        line: LineSanitizer,
        overrides: OverrideTable,
    ) -> Self {
        Self {
            document,
            line,
            overrides,
        }
    }

    /// The override table, for dispatch inspection.
    #[must_use]
    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    /// Sanitize one document, identified by its relative path.
    #[must_use]
    pub fn sanitize(&self, relative_path: &str, raw: &str) -> String {
        let content = self.document.sanitize(raw);
        let content = content
            .split('\n')
            .map(|line| self.line.sanitize(line))
            .collect::<Vec<_>>()
            .join("\n");
        self.overrides.apply(relative_path, &content)
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sanitize(path: &str, raw: &str) -> String {
        Sanitizer::new().sanitize(path, raw)
    }

    #[test]
    fn test_document_pass_runs_before_line_pass() {
        // The quoted span is closed by the document pass; the line pass
        // then leaves the balanced span alone.
        assert_eq!(
            sanitize("core/Array.md", "Use `first' or Array#last."),
            "Use `first` or `Array#last`."
        );
    }

    #[test]
    fn test_code_lines_survive_the_line_pass() {
        let raw = "Example:\n\n    a --- Array#each\n\nDone.";
        assert_eq!(sanitize("core/Array.md", raw), raw);
    }

    #[test]
    fn test_override_runs_last() {
        // The bullet gains its blank line from the generic rules, then the
        // keywords override wraps the bullet term.
        let raw = "Keywords follow.\nA list:\n* alias: creates an alias";
        assert_eq!(
            sanitize("doc/keywords.md", raw),
            "Keywords follow.\nA list:\n\n* `alias`: creates an alias"
        );
    }

    #[test]
    fn test_no_override_for_unlisted_path() {
        let raw = "* alias: creates an alias";
        assert_eq!(sanitize("doc/other.md", raw), "* alias: creates an alias");
    }

    #[test]
    fn test_line_boundaries_are_preserved() {
        let raw = "one\ntwo\n\nthree";
        assert_eq!(sanitize("x.md", raw), "one\ntwo\n\nthree");
    }
}
