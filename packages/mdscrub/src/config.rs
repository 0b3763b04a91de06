//! Configuration constants for the sanitizer.

/// File extension of documents in the input tree.
pub const MARKDOWN_EXTENSION: &str = "md";

/// Leading indent that marks a line as literal code.
///
/// The prose/code distinction is exactly this prefix check. The override
/// table and the rule ordering are tuned against its false positives and
/// negatives, so it must not be replaced by real Markdown parsing.
pub const CODE_INDENT: &str = "    ";

/// Default input root: where the renderer leaves its output.
pub const DEFAULT_INPUT_ROOT: &str = "intermediate/parsed";

/// Default output root for the sanitized tree.
pub const DEFAULT_OUTPUT_ROOT: &str = "intermediate/sanitized";
