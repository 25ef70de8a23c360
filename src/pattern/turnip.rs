//! [Turnip]-style step patterns.
//!
//! ```text
//! I have :count "thing(s)" in my basket/cart
//! ```
//!
//! - `:name` is a placeholder, accepting a `"double quoted"`, a
//!   `'single quoted'` or a bare word value;
//! - `(s)` is an optional part, eating up to one adjacent whitespace on each
//!   side;
//! - `basket/cart` is an alternation of two words.
//!
//! [Turnip]: https://github.com/jnicklas/turnip

use std::borrow::Cow;

use lazy_regex::regex;
use regex::Captures;

use super::{
    literal::{self, Token},
    matcher::ALIAS_SEPARATOR,
    unescape, Pattern, PatternPolicy,
};

/// Characters escaped before placeholders, optional parts and alternatives
/// are recognized, so those are looked for as `\:`, `\(`, `\)` and `\/`.
const QUOTED: &[char] = &[
    '.', '\\', '+', '*', '?', '[', '^', ']', '$', '(', ')', '{', '}', '=', '!',
    '<', '>', '|', ':', '-', '#', '/',
];

/// Escaped characters that aren't special in the `regex` crate syntax and
/// have to be unescaped in the final source (`\<` and `\>` would otherwise
/// turn into word boundaries).
const INERT: &[char] = &[':', '=', '!', '<', '>', '/'];

/// Delimiters making a pattern a raw regular expression rather than a turnip
/// one.
pub const DELIMITERS: &[char] = &['/', '~', '#', '`'];

/// [`PatternPolicy`] for turnip patterns.
///
/// This is the default policy: it handles patterns of no explicit type.
#[derive(Clone, Copy, Debug, Default)]
pub struct TurnipPatternPolicy;

impl PatternPolicy for TurnipPatternPolicy {
    fn supports_pattern_type(&self, kind: Option<&str>) -> bool {
        matches!(kind, None | Some("turnip"))
    }

    fn generate_pattern(&self, step_text: &str) -> Pattern {
        let tokens = literal::tokenize(step_text);
        let count = tokens
            .iter()
            .filter(|t| matches!(t, Token::Literal { .. }))
            .count();
        let pattern = tokens
            .into_iter()
            .map(|t| match t {
                Token::Text(s) => Cow::Borrowed(s),
                Token::Literal { index, .. } => format!(":arg{index}").into(),
            })
            .collect::<String>();

        Pattern::new(literal::canonical_text(step_text), pattern, count)
    }

    fn supports_pattern(&self, pattern: &str) -> bool {
        !is_delimited(pattern)
    }

    fn transform_pattern_to_regex(&self, pattern: &str) -> String {
        let regex = quote(pattern);

        let regex = regex!(r"\\:([A-Za-z0-9_]+)")
            .replace_all(&regex, |caps: &Captures<'_>| placeholder(&caps[1]));

        let regex = regex!(r"(\s)?\\\(([^\\]+)\\\)(\s)?").replace_all(
            &regex,
            |caps: &Captures<'_>| {
                let side = |i| {
                    caps.get(i)
                        .map(|m| format!("(?:{})?", m.as_str()))
                        .unwrap_or_default()
                };
                format!("{}(?:{})?{}", side(1), &caps[2], side(3))
            },
        );

        let regex =
            regex!(r"(\w+)\\/(\w+)").replace_all(&regex, "(?:${1}|${2})");

        format!("^{}$", unescape(&regex, INERT))
    }
}

/// Checks whether the given `pattern` is wrapped into the same regex
/// delimiter on both ends.
#[must_use]
pub fn is_delimited(pattern: &str) -> bool {
    match (pattern.chars().next(), pattern.chars().next_back()) {
        (Some(first), Some(last)) => first == last && DELIMITERS.contains(&first),
        _ => false,
    }
}

/// Capture group of a placeholder with the given `name`.
///
/// The `regex` crate has no look-arounds, so a bare value is bounded by `\b`
/// only. This accepts it at the very start of a step and before `'s`
/// (`:name's car` matches `Bob's car`), where a whitespace-bounded value
/// wouldn't be found.
fn placeholder(name: &str) -> String {
    let sep = ALIAS_SEPARATOR;
    format!(
        r#"(?:"(?P<{name}>[^"]+)"|'(?P<{name}{sep}single>[^']+)'|\b(?P<{name}{sep}bare>\w+)\b)"#,
    )
}

fn quote(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    for c in pattern.chars() {
        if QUOTED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Matcher;

    fn compile(pattern: &str) -> Matcher {
        Matcher::new(TurnipPatternPolicy.transform_pattern_to_regex(pattern))
    }

    #[test]
    fn supports_default_and_turnip_types() {
        let policy = TurnipPatternPolicy;

        assert!(policy.supports_pattern_type(None));
        assert!(policy.supports_pattern_type(Some("turnip")));
        assert!(!policy.supports_pattern_type(Some("regex")));
    }

    #[test]
    fn rejects_delimited_patterns() {
        let policy = TurnipPatternPolicy;

        assert!(!policy.supports_pattern("/^foo$/"));
        assert!(!policy.supports_pattern("/anything at all/"));
        assert!(!policy.supports_pattern("#x#"));
        assert!(!policy.supports_pattern("/"));
        assert!(policy.supports_pattern("/^foo$/i"));
        assert!(policy.supports_pattern("I have :count apples"));
        assert!(policy.supports_pattern("a/b"));
        assert!(policy.supports_pattern(""));
    }

    #[test]
    fn generates_pattern_with_numbered_arguments() {
        let pattern = TurnipPatternPolicy
            .generate_pattern(r#"I have 5 'red' "apples" in my basket"#);

        assert_eq!(pattern.source(), "I have :arg3 :arg2 :arg1 in my basket");
        assert_eq!(pattern.placeholder_count(), 3);
        assert_eq!(pattern.canonical_text(), "IHaveInMyBasket");
    }

    #[test]
    fn generated_pattern_matches_its_step() {
        let text = r#"I pay "42" euros to 'Bob' 3 times"#;
        let pattern = TurnipPatternPolicy.generate_pattern(text);
        let matcher = compile(pattern.source());

        let args = matcher.arguments(text).unwrap();
        assert_eq!(
            args.into_iter().collect::<Vec<_>>(),
            [
                ("arg1".to_owned(), "42".to_owned()),
                ("arg2".to_owned(), "Bob".to_owned()),
                ("arg3".to_owned(), "3".to_owned()),
            ],
        );
    }

    #[test]
    fn placeholder_accepts_quoted_or_bare_values() {
        let matcher = compile("I am :name");

        for (text, expected) in [
            (r#"I am "John Doe""#, "John Doe"),
            ("I am 'Jane'", "Jane"),
            ("I am Bob", "Bob"),
        ] {
            let args = matcher.arguments(text).unwrap();
            assert_eq!(args.get("name").map(String::as_str), Some(expected));
        }
        assert!(!matcher.is_match("I am "));
    }

    #[test]
    fn bare_value_is_word_bounded() {
        let leading = compile(":name arrives");
        let args = leading.arguments("Bob arrives").unwrap();
        assert_eq!(args.get("name").map(String::as_str), Some("Bob"));

        let possessive = compile(":name's car");
        let args = possessive.arguments("Bob's car").unwrap();
        assert_eq!(args.get("name").map(String::as_str), Some("Bob"));
    }

    #[test]
    fn optional_word() {
        let matcher = compile(r#"I have :count "thing(s)""#);

        assert!(matcher.is_match(r#"I have 3 "thing""#));
        assert!(matcher.is_match(r#"I have 3 "things""#));
        assert!(!matcher.is_match(r#"I have "thing""#));
    }

    #[test]
    fn optional_word_folds_whitespace() {
        let matcher = compile("I (really) like it");

        assert!(matcher.is_match("I really like it"));
        assert!(matcher.is_match("I like it"));
        assert!(!matcher.is_match("I rather like it"));
    }

    #[test]
    fn alternative_words() {
        let matcher = compile("I pet the cat/dog");

        assert!(matcher.is_match("I pet the cat"));
        assert!(matcher.is_match("I pet the dog"));
        assert!(!matcher.is_match("I pet the cow"));
        assert!(!matcher.is_match("I pet the cat/dog"));
    }

    #[test]
    fn metacharacters_are_literal() {
        let matcher = compile("it costs $5.00 [net] + tax? <yes>: a=b!");

        assert!(matcher.is_match("it costs $5.00 [net] + tax? <yes>: a=b!"));
        assert!(!matcher.is_match("it costs $5x00 [net] + tax? <yes>: a=b!"));
    }

    #[test]
    fn full_match_is_required() {
        let matcher = compile("I log in");

        assert!(matcher.is_match("I log in"));
        assert!(!matcher.is_match("I log in twice"));
        assert!(!matcher.is_match("Then I log in"));
    }

    #[test]
    fn malformed_syntax_never_raises() {
        let unbalanced = compile("I have (some apples");
        assert!(!unbalanced.is_degraded());
        assert!(unbalanced.is_match("I have (some apples"));
        assert!(!unbalanced.is_match("I have some apples"));

        let duplicated = compile(":a and :a");
        assert!(duplicated.is_degraded());
        assert!(!duplicated.is_match("x and y"));
    }
}
