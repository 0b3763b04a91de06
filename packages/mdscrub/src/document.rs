//! Whole-document sanitization rules.
//!
//! These rules run over the full text of one document, in declaration
//! order, before the text is split into lines. Several later rules depend
//! on text produced by earlier ones: the quoted-span normalization expects
//! the shape one literal fix produces, and is itself followed by two
//! targeted corrections for spans it breaks. Reordering changes output.

use crate::rules::Rule;

/// Applies an ordered list of whole-document rules.
pub struct DocumentSanitizer {
    rules: Vec<Rule>,
}

impl DocumentSanitizer {
    /// Create a sanitizer with the default rule list.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(default_document_rules())
    }

    /// Create a sanitizer with a caller-supplied rule list.
    #[must_use]
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The rules, in application order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Run every rule once, in order, each consuming the previous output.
    #[must_use]
    pub fn sanitize(&self, raw: &str) -> String {
        let mut text = raw.to_string();
        for rule in &self.rules {
            text = rule.apply(&text);
        }
        text
    }
}

impl Default for DocumentSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// The default whole-document rules, in their load-bearing order.
#[must_use]
pub fn default_document_rules() -> Vec<Rule> {
    vec![
        // Leading editor-settings comment emitted by the renderer, never content.
        Rule::pattern_first("strip-editor-settings", r"^#\s*-\*-[^\n]+\n", ""),
        Rule::custom("trim-document", |text: &str| text.trim().to_string()),
        // A reference label the renderer splits across a definition line.
        Rule::literal(
            "fix-ruby-talk-label",
            "ruby-talk:69518\n:   ",
            "[ruby-talk:69518] ",
        ),
        // Term line plus 3-space-indented description; Markdown has no
        // definition lists, so render as a bullet.
        Rule::pattern("definition-list-to-bullet", r"\n(.+)\n: {3}(\S)", "\n* $1: $2"),
        // Code spans quoted backtick-to-apostrophe become balanced spans.
        Rule::pattern("close-quoted-code-spans", r"`(\w[^\n`']*?)'", "`$1`"),
        // One span the previous rule breaks (nested backtick-quote markup).
        Rule::literal("fix-regex-name-example", "`(?``*name*`')`", "`(?'`*name*`')`"),
        // And another one.
        Rule::literal("fix-enor-quote", "`enor'", "'enor'"),
        // Markdown needs a blank line between a paragraph and a list start.
        Rule::pattern(
            "blank-line-before-list",
            r"(\n[^*\n][^\n]+)\n(\* )",
            "$1\n\n$2",
        ),
        // Whitespace wrongly inserted between [RFCnnnn] and its link.
        Rule::pattern("tighten-rfc-links", r"(\[RFC\d+\])\s+(\(http)", "$1$2"),
    ]
}
