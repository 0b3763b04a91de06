//! Line-level sanitization with the prose/code heuristic.
//!
//! Lines indented with four spaces are literal code and pass through
//! byte-for-byte. Everything else is prose and gets the ordered line rules.
//! The code check is intentionally naive; the override table and the rest
//! of the pipeline are tuned against its exact behavior.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::CODE_INDENT;
use crate::rules::Rule;

/// `FooBar#method` - a class- or module-qualified method reference.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static QUALIFIED_METHOD_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][a-zA-Z:]+#[a-z_?!\[\]=]+").expect("valid regex"));

/// `#method` - a bare method reference.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BARE_METHOD_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[a-z_?!\[\]=]+").expect("valid regex"));

/// `__CONSTANT__` - a double-underscore-delimited constant.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DUNDER_CONSTANT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__[A-Z_]+__").expect("valid regex"));

/// A backtick sitting between two lowercase letters.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BACKTICK_BETWEEN_LOWERCASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])`([a-z])").expect("valid regex"));

/// Applies an ordered list of line-scoped rules to prose lines.
pub struct LineSanitizer {
    rules: Vec<Rule>,
}

impl LineSanitizer {
    /// Create a sanitizer with the default rule list.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(default_line_rules())
    }

    /// Create a sanitizer with a caller-supplied rule list.
    #[must_use]
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Sanitize one physical line.
    ///
    /// Code lines (leading 4-space indent) are returned unchanged; the
    /// check runs before any rule.
    #[must_use]
    pub fn sanitize(&self, line: &str) -> String {
        if line.starts_with(CODE_INDENT) {
            return line.to_string();
        }

        let mut text = line.to_string();
        for rule in &self.rules {
            text = rule.apply(&text);
        }
        text
    }
}

impl Default for LineSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// The default line rules.
///
/// The three wrapping rules must run before the apostrophe rule, which
/// would otherwise corrupt a code-span delimiter they introduce or
/// preserve.
#[must_use]
pub fn default_line_rules() -> Vec<Rule> {
    vec![
        Rule::custom("wrap-qualified-method-refs", wrap_qualified_method_refs),
        Rule::custom("wrap-bare-method-refs", wrap_bare_method_refs),
        Rule::custom("wrap-double-underscore-constants", wrap_dunder_constants),
        Rule::custom("backtick-to-apostrophe", backtick_to_apostrophe),
        Rule::literal("triple-hyphen-to-em-dash", "---", "\u{2014}"),
    ]
}

/// Characters that may continue a method-name token; a reference only ends
/// where none of these (and no backtick) follows.
fn is_method_tail(c: char) -> bool {
    c == '`' || c.is_ascii_lowercase() || matches!(c, '_' | '?' | '!' | '=' | '[' | ']')
}

/// `FooBar#method` is always a method reference; wrap it unless it already
/// sits against a backtick.
fn wrap_qualified_method_refs(line: &str) -> String {
    wrap_where(
        line,
        &QUALIFIED_METHOD_REF,
        |before| matches!(before, Some(c) if c != '`'),
        |after| after.is_none_or(|c| !is_method_tail(c)),
    )
}

/// `#method` at a word start is always a method reference.
fn wrap_bare_method_refs(line: &str) -> String {
    wrap_where(
        line,
        &BARE_METHOD_REF,
        |before| matches!(before, None | Some(' ')),
        |after| after.is_none_or(|c| !is_method_tail(c)),
    )
}

/// `__CONSTANT__` tokens surrounded by non-backtick text.
fn wrap_dunder_constants(line: &str) -> String {
    wrap_where(
        line,
        &DUNDER_CONSTANT,
        |before| matches!(before, Some(c) if c != '`'),
        |after| matches!(after, Some(c) if c != '`'),
    )
}

/// Wrap each token match in backticks when its adjacent characters pass
/// the boundary checks.
///
/// The boundary conditions were look-around assertions upstream; the regex
/// crate has none, so matches are checked against the characters next to
/// them here. A rejected match resumes the scan one character past its
/// start, the way a zero-width assertion would.
fn wrap_where(
    line: &str,
    token: &Regex,
    before_ok: impl Fn(Option<char>) -> bool,
    after_ok: impl Fn(Option<char>) -> bool,
) -> String {
    let mut out = String::with_capacity(line.len() + 8);
    let mut copied = 0;
    let mut at = 0;
    while let Some(m) = token.find_at(line, at) {
        let before = line[..m.start()].chars().next_back();
        let after = line[m.end()..].chars().next();
        if before_ok(before) && after_ok(after) {
            out.push_str(&line[copied..m.start()]);
            out.push('`');
            out.push_str(m.as_str());
            out.push('`');
            copied = m.end();
            at = m.end();
        } else {
            at = m.start()
                + line[m.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
        }
    }
    out.push_str(&line[copied..]);
    out
}

/// A backtick between two lowercase letters is punctuation, not a span
/// delimiter.
fn backtick_to_apostrophe(line: &str) -> String {
    // Loop until no more replacements needed (handles adjacent occurrences
    // sharing a letter, like "a`b`c")
    let mut result = line.to_string();
    loop {
        let replaced = BACKTICK_BETWEEN_LOWERCASE
            .replace_all(&result, "$1'$2")
            .to_string();
        if replaced == result {
            break;
        }
        result = replaced;
    }
    result
}
