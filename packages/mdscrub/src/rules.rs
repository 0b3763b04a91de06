//! Atomic text transform rules.
//!
//! A [`Rule`] pairs a match pattern with a replacement and is applied as a
//! total function from string to string: a non-matching pattern leaves the
//! text unchanged. Rules are stateless; the order of a rule list is part of
//! the sanitizer contract because later rules match text produced by
//! earlier ones.

use regex::Regex;

/// A single ordered text transform.
pub struct Rule {
    name: &'static str,
    action: Action,
}

enum Action {
    /// Exact substring replacement, every occurrence.
    Literal {
        find: &'static str,
        replace: &'static str,
    },
    /// Exact substring replacement, first occurrence only.
    LiteralFirst {
        find: &'static str,
        replace: &'static str,
    },
    /// Regex replacement with `$N` capture expansion, every match.
    Pattern { regex: Regex, replace: &'static str },
    /// Regex replacement, first match only.
    PatternFirst { regex: Regex, replace: &'static str },
    /// Free-form rewrite for transforms patterns cannot express.
    Custom(fn(&str) -> String),
}

impl Rule {
    /// Replace every occurrence of an exact substring.
    #[must_use]
    pub fn literal(name: &'static str, find: &'static str, replace: &'static str) -> Self {
        Self {
            name,
            action: Action::Literal { find, replace },
        }
    }

    /// Replace the first occurrence of an exact substring.
    #[must_use]
    pub fn literal_first(name: &'static str, find: &'static str, replace: &'static str) -> Self {
        Self {
            name,
            action: Action::LiteralFirst { find, replace },
        }
    }

    /// Replace every regex match, expanding `$N` captures in `replace`.
    #[must_use]
    #[allow(clippy::expect_used)] // Patterns are crate-authored literals that are guaranteed to be valid
    pub fn pattern(name: &'static str, pattern: &str, replace: &'static str) -> Self {
        Self {
            name,
            action: Action::Pattern {
                regex: Regex::new(pattern).expect("valid regex"),
                replace,
            },
        }
    }

    /// Replace the first regex match only.
    #[must_use]
    #[allow(clippy::expect_used)] // Patterns are crate-authored literals that are guaranteed to be valid
    pub fn pattern_first(name: &'static str, pattern: &str, replace: &'static str) -> Self {
        Self {
            name,
            action: Action::PatternFirst {
                regex: Regex::new(pattern).expect("valid regex"),
                replace,
            },
        }
    }

    /// Apply a free-form rewrite function.
    #[must_use]
    pub fn custom(name: &'static str, apply: fn(&str) -> String) -> Self {
        Self {
            name,
            action: Action::Custom(apply),
        }
    }

    /// Name of the rule, for logs and tests.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Apply the rule to `text`, producing the rewritten string.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        match &self.action {
            Action::Literal { find, replace } => text.replace(find, replace),
            Action::LiteralFirst { find, replace } => text.replacen(find, replace, 1),
            Action::Pattern { regex, replace } => regex.replace_all(text, *replace).into_owned(),
            Action::PatternFirst { regex, replace } => regex.replace(text, *replace).into_owned(),
            Action::Custom(apply) => apply(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_replaces_all() {
        let rule = Rule::literal("dashes", "--", "=");
        assert_eq!(rule.apply("a--b--c"), "a=b=c");
    }

    #[test]
    fn test_literal_first_replaces_once() {
        let rule = Rule::literal_first("first-dash", "--", "=");
        assert_eq!(rule.apply("a--b--c"), "a=b--c");
    }

    #[test]
    fn test_pattern_expands_captures() {
        let rule = Rule::pattern("swap", r"(\w+)=(\w+)", "$2=$1");
        assert_eq!(rule.apply("a=b c=d"), "b=a d=c");
    }

    #[test]
    fn test_pattern_first_replaces_once() {
        let rule = Rule::pattern_first("head", r"\d+", "N");
        assert_eq!(rule.apply("1 and 2"), "N and 2");
    }

    #[test]
    fn test_custom() {
        let rule = Rule::custom("upper", |text: &str| text.to_uppercase());
        assert_eq!(rule.apply("abc"), "ABC");
    }

    #[test]
    fn test_non_matching_rule_is_identity() {
        let rule = Rule::pattern("none", r"zzz", "x");
        assert_eq!(rule.apply("nothing here"), "nothing here");
    }

    #[test]
    fn test_rule_name() {
        let rule = Rule::literal("named", "a", "b");
        assert_eq!(rule.name(), "named");
    }
}
