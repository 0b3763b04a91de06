//! Per-document override table.
//!
//! Bespoke final fixes keyed by document identity. Each entry pairs a path
//! matcher with a small deterministic transform applied after the generic
//! passes have run. Entries are evaluated top to bottom and only the first
//! match fires; no match means the content passes through unchanged. New
//! per-document fixes belong here, never in the generic rule engines.

use std::sync::LazyLock;

use regex::Regex;

/// `* term:` bullet whose leading token should be inline code.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BULLET_TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\* (\S+):").expect("valid regex"));

/// A `$x` global right after "to " or "to the ".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static GLOBAL_AFTER_TO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(to the |to )(\$.)").expect("valid regex"));

/// A well-known global not already preceded by a backtick.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BARE_GLOBAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[^`])\$(stdin|stdout|DEBUG|VERBOSE)").expect("valid regex"));

/// `* $VAR: $VAR` bullet pairs in the English aliases document.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ENGLISH_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\* (\$.+?): (\$.+?)$").expect("valid regex"));

/// "Log format:" / "Log sample:" labels glued to their example block.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LOG_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(Log (?:format|sample)):\n").expect("valid regex"));

/// "Used:"/"output:" labels glued to the shell transcript that follows.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SHELL_EXAMPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"((?:Used|output):)\n(    bash-3\.2)").expect("valid regex"));

/// `ref:` cross-reference markers with a backticked target.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static REF_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ref:`(.+?)`").expect("valid regex"));

/// The first physical line of a document.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FIRST_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.+\n").expect("valid regex"));

/// Matches a document's `/`-separated path relative to the input root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMatcher {
    /// The exact relative path.
    Exact(&'static str),
    /// Any path under the given directory prefix.
    Prefix(&'static str),
}

impl PathMatcher {
    /// Check whether the matcher accepts the given relative path.
    #[must_use]
    pub fn matches(&self, relative_path: &str) -> bool {
        match self {
            Self::Exact(path) => relative_path == *path,
            Self::Prefix(prefix) => relative_path.starts_with(prefix),
        }
    }
}

/// One override: a path matcher plus a finishing transform.
pub struct OverrideEntry {
    /// Which document(s) the entry applies to.
    pub matcher: PathMatcher,
    /// Name of the entry, for logs and tests.
    pub name: &'static str,
    /// The document-specific fix.
    pub transform: fn(&str) -> String,
}

/// Ordered list of per-document overrides, first match wins.
pub struct OverrideTable {
    entries: Vec<OverrideEntry>,
}

impl OverrideTable {
    /// Create a table with the default entries.
    #[must_use]
    pub fn new() -> Self {
        Self::with_entries(default_table())
    }

    /// Create a table with caller-supplied entries.
    #[must_use]
    pub fn with_entries(entries: Vec<OverrideEntry>) -> Self {
        Self { entries }
    }

    /// The first entry matching the path, if any.
    #[must_use]
    pub fn entry_for(&self, relative_path: &str) -> Option<&OverrideEntry> {
        self.entries
            .iter()
            .find(|entry| entry.matcher.matches(relative_path))
    }

    /// Apply the first matching transform; identity when none matches.
    #[must_use]
    pub fn apply(&self, relative_path: &str, content: &str) -> String {
        match self.entry_for(relative_path) {
            Some(entry) => (entry.transform)(content),
            None => content.to_string(),
        }
    }
}

impl Default for OverrideTable {
    fn default() -> Self {
        Self::new()
    }
}

/// The default override entries, in dispatch order.
#[must_use]
pub fn default_table() -> Vec<OverrideEntry> {
    vec![
        OverrideEntry {
            matcher: PathMatcher::Exact("doc/keywords.md"),
            name: "keywords-code-bullets",
            transform: wrap_bullet_terms,
        },
        OverrideEntry {
            matcher: PathMatcher::Exact("doc/globals.md"),
            name: "globals-code-bullets",
            transform: fix_global_variables,
        },
        OverrideEntry {
            matcher: PathMatcher::Exact("core/Class.md"),
            name: "class-diagram-break",
            transform: fix_class_diagram_break,
        },
        OverrideEntry {
            matcher: PathMatcher::Exact("core/Float.md"),
            name: "float-rejoin-wrapped-word",
            transform: fix_float_wrapped_word,
        },
        OverrideEntry {
            matcher: PathMatcher::Exact("lib/cgi/CGI.md"),
            name: "cgi-field-reference",
            transform: fix_cgi_field_reference,
        },
        OverrideEntry {
            matcher: PathMatcher::Exact("lib/irb/IRB.md"),
            name: "irb-conf-reference",
            transform: fix_irb_conf_reference,
        },
        OverrideEntry {
            matcher: PathMatcher::Exact("lib/prime/Prime.md"),
            name: "prime-spacing-and-spans",
            transform: fix_prime_spans,
        },
        OverrideEntry {
            matcher: PathMatcher::Exact("core/String.md"),
            name: "string-bang-span",
            transform: fix_string_bang_span,
        },
        OverrideEntry {
            matcher: PathMatcher::Prefix("ext/date/"),
            name: "drop-duplicate-header",
            transform: drop_duplicate_header,
        },
        OverrideEntry {
            matcher: PathMatcher::Exact("lib/abbrev/Abbrev.md"),
            name: "abbrev-generates-spacing",
            transform: fix_abbrev_spacing,
        },
        OverrideEntry {
            matcher: PathMatcher::Exact("lib/logger/Logger.md"),
            name: "logger-label-spacing",
            transform: fix_logger_spacing,
        },
        OverrideEntry {
            matcher: PathMatcher::Exact("lib/pp/PP.md"),
            name: "pp-returns-spacing",
            transform: fix_pp_spacing,
        },
        OverrideEntry {
            matcher: PathMatcher::Exact("lib/optparse/OptionParser.md"),
            name: "optparse-shell-spacing",
            transform: fix_optparse_spacing,
        },
        OverrideEntry {
            matcher: PathMatcher::Exact("lib/English/English.md"),
            name: "english-globals",
            transform: fix_english_globals,
        },
        OverrideEntry {
            matcher: PathMatcher::Exact("_special/kernel.md"),
            name: "kernel-ref-markers",
            transform: strip_kernel_ref_markers,
        },
    ]
}

/// Wrap each bullet's leading token in inline code.
fn wrap_bullet_terms(content: &str) -> String {
    BULLET_TERM.replace_all(content, "\n* `$1`:").into_owned()
}

/// Global-variable fixes for the globals document.
///
/// The "to the $x" wrap catches only the dollar sign and one character, so
/// it leaves a split span behind for `$stderr`; the literal fix right
/// after rejoins it.
fn fix_global_variables(content: &str) -> String {
    let text = wrap_bullet_terms(content);
    let text = GLOBAL_AFTER_TO.replace_all(&text, "$1`$2`");
    let text = text.replacen("`$s`tderr", "`$stderr`", 1);
    let text = text.replacen("`$``", "<code class=\"highlighter-rouge\">$`</code>", 1);
    BARE_GLOBAL.replace_all(&text, "${1}`$$${2}`").into_owned()
}

/// Blank line after one sentence so the diagram below it renders.
fn fix_class_diagram_break(content: &str) -> String {
    content.replacen("of the class `Class`.", "of the class `Class`.\n", 1)
}

/// One word the renderer wrapped mid-word into a code line.
fn fix_float_wrapped_word(content: &str) -> String {
    content.replacen(
        "wiki-floats_i\n    mprecise\n\n",
        "wiki-floats_imprecise\n",
        1,
    )
}

/// One malformed bracket reference rewritten as a method call span.
fn fix_cgi_field_reference(content: &str) -> String {
    content.replacen("[cgi]('field_name')", "`cgi['field_name']`", 1)
}

/// One malformed bracket reference rewritten as a code span.
fn fix_irb_conf_reference(content: &str) -> String {
    content.replacen("[IRB.conf](:IRB_RC)", "`IRB.conf[:IRB_RC]`", 1)
}

/// Missing blank line before an example plus two backtick placements.
fn fix_prime_spans(content: &str) -> String {
    content
        .replacen("e.g.\n    Prime", "e.g.\n\n    Prime", 1)
        .replacen("`Prime`.instance", "`Prime.instance`", 1)
        .replace("`Prime`::`", "`Prime::")
}

/// One double-backtick artifact.
fn fix_string_bang_span(content: &str) -> String {
    content.replace("``!''", "`!`")
}

/// Drop the duplicated first header line the render script inserts.
fn drop_duplicate_header(content: &str) -> String {
    FIRST_LINE.replace(content, "").into_owned()
}

/// Blank line after the "*Generates:*" label.
fn fix_abbrev_spacing(content: &str) -> String {
    content.replace("*Generates:*\n", "*Generates:*\n\n")
}

/// Blank line after "Log format:" and "Log sample:" labels.
fn fix_logger_spacing(content: &str) -> String {
    LOG_LABEL.replace_all(content, "$1\n\n").into_owned()
}

/// Blank line after "returns this:".
fn fix_pp_spacing(content: &str) -> String {
    content.replace("returns this:\n", "returns this:\n\n")
}

/// Blank line before a shell transcript, only when one follows directly.
fn fix_optparse_spacing(content: &str) -> String {
    SHELL_EXAMPLE.replace_all(content, "$1\n\n$2").into_owned()
}

/// Wrap `$VAR: $VAR` bullet pairs in inline code; fix the backtick alias.
fn fix_english_globals(content: &str) -> String {
    ENGLISH_PAIR
        .replace_all(content, "* `$1`: `$2`")
        .replacen("`$``", "<code class=\"highlighter-rouge\">$`</code>", 1)
}

/// Keep only the target label of `ref:` cross-reference markers.
fn strip_kernel_ref_markers(content: &str) -> String {
    REF_MARKER.replace_all(content, "ref:$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_path_matcher_exact() {
        let matcher = PathMatcher::Exact("doc/keywords.md");
        assert!(matcher.matches("doc/keywords.md"));
        assert!(!matcher.matches("doc/keywords.md.bak"));
        assert!(!matcher.matches("other/doc/keywords.md"));
    }

    #[test]
    fn test_path_matcher_prefix() {
        let matcher = PathMatcher::Prefix("ext/date/");
        assert!(matcher.matches("ext/date/Date.md"));
        assert!(matcher.matches("ext/date/calendar/Julian.md"));
        assert!(!matcher.matches("ext/dates/Date.md"));
    }

    #[test]
    fn test_unmatched_path_is_identity() {
        let table = OverrideTable::new();
        assert_eq!(table.apply("core/Array.md", "unchanged text"), "unchanged text");
        assert!(table.entry_for("core/Array.md").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        fn first(_: &str) -> String {
            "first".to_string()
        }
        fn second(_: &str) -> String {
            "second".to_string()
        }
        let table = OverrideTable::with_entries(vec![
            OverrideEntry {
                matcher: PathMatcher::Prefix("doc/"),
                name: "first",
                transform: first,
            },
            OverrideEntry {
                matcher: PathMatcher::Exact("doc/keywords.md"),
                name: "second",
                transform: second,
            },
        ]);
        assert_eq!(table.apply("doc/keywords.md", "x"), "first");
    }

    #[test]
    fn test_keywords_bullet_terms() {
        let table = OverrideTable::new();
        assert_eq!(
            table.apply("doc/keywords.md", "\n* foo: bar\n"),
            "\n* `foo`: bar\n"
        );
    }

    #[test]
    fn test_globals_bullets_and_bare_globals() {
        let out = fix_global_variables("\n* $stdin: standard input\nSet $DEBUG to trace.");
        assert_eq!(out, "\n* `$stdin`: standard input\nSet `$DEBUG` to trace.");
    }

    #[test]
    fn test_globals_stderr_rejoined() {
        let out = fix_global_variables("Writes to the $stderr stream.");
        assert_eq!(out, "Writes to the `$stderr` stream.");
    }

    #[test]
    fn test_globals_backtick_alias_becomes_code_tag() {
        let out = fix_global_variables("The alias `$`` holds the pre-match.");
        assert_eq!(
            out,
            "The alias <code class=\"highlighter-rouge\">$`</code> holds the pre-match."
        );
    }

    #[test]
    fn test_globals_already_coded_left_alone() {
        let out = fix_global_variables("Use `$stdout` directly.");
        assert_eq!(out, "Use `$stdout` directly.");
    }

    #[test]
    fn test_class_diagram_break() {
        let out = fix_class_diagram_break("instance of the class `Class`.\n    Class");
        assert_eq!(out, "instance of the class `Class`.\n\n    Class");
    }

    #[test]
    fn test_float_rejoin_wrapped_word() {
        let out = fix_float_wrapped_word("see wiki-floats_i\n    mprecise\n\nnext");
        assert_eq!(out, "see wiki-floats_imprecise\nnext");
    }

    #[test]
    fn test_cgi_field_reference() {
        let out = fix_cgi_field_reference("Use [cgi]('field_name') to fetch.");
        assert_eq!(out, "Use `cgi['field_name']` to fetch.");
    }

    #[test]
    fn test_irb_conf_reference() {
        let out = fix_irb_conf_reference("Set [IRB.conf](:IRB_RC) to a proc.");
        assert_eq!(out, "Set `IRB.conf[:IRB_RC]` to a proc.");
    }

    #[test]
    fn test_prime_spacing_and_spans() {
        let out = fix_prime_spans("e.g.\n    Prime.each\nand `Prime`.instance or `Prime`::`Foo`");
        assert_eq!(
            out,
            "e.g.\n\n    Prime.each\nand `Prime.instance` or `Prime::Foo`"
        );
    }

    #[test]
    fn test_string_bang_span() {
        assert_eq!(fix_string_bang_span("the ``!'' method"), "the `!` method");
    }

    #[test]
    fn test_drop_duplicate_header() {
        assert_eq!(drop_duplicate_header("# Date\n# Date\n\nbody"), "# Date\n\nbody");
        // A single line without a newline is left alone.
        assert_eq!(drop_duplicate_header("# Date"), "# Date");
    }

    #[test]
    fn test_abbrev_spacing() {
        assert_eq!(
            fix_abbrev_spacing("*Generates:*\n    abbrev"),
            "*Generates:*\n\n    abbrev"
        );
    }

    #[test]
    fn test_logger_spacing() {
        assert_eq!(
            fix_logger_spacing("Log format:\n    sev\nLog sample:\n    I, [x]"),
            "Log format:\n\n    sev\nLog sample:\n\n    I, [x]"
        );
    }

    #[test]
    fn test_pp_spacing() {
        assert_eq!(
            fix_pp_spacing("returns this:\n    #<Foo>"),
            "returns this:\n\n    #<Foo>"
        );
    }

    #[test]
    fn test_optparse_spacing_only_before_transcript() {
        assert_eq!(
            fix_optparse_spacing("Used:\n    bash-3.2$ ruby x.rb"),
            "Used:\n\n    bash-3.2$ ruby x.rb"
        );
        // Without the transcript right after, the label is left alone.
        assert_eq!(fix_optparse_spacing("Used:\nplain text"), "Used:\nplain text");
    }

    #[test]
    fn test_english_globals() {
        assert_eq!(
            fix_english_globals("* $LAST_MATCH_INFO: $~\n* $MATCH: $&"),
            "* `$LAST_MATCH_INFO`: `$~`\n* `$MATCH`: `$&`"
        );
    }

    #[test]
    fn test_kernel_ref_markers() {
        assert_eq!(
            strip_kernel_ref_markers("see ref:`Kernel#puts` and ref:`Kernel#p` docs"),
            "see ref:Kernel#puts and ref:Kernel#p docs"
        );
    }
}
