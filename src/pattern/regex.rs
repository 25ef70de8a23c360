//! Raw regular expression step patterns (`/^I have (\d+) apples?$/i`).

use itertools::Itertools as _;

use super::{
    literal::{self, LiteralKind, Token},
    turnip::DELIMITERS,
    unescape, Pattern, PatternPolicy,
};

/// Trailing modifiers a delimited pattern may carry.
const FLAGS: &[char] =
    &['i', 'm', 's', 'x', 'A', 'D', 'S', 'U', 'X', 'J', 'u'];

/// Modifiers having an inline counterpart in the `regex` crate syntax.
const INLINE_FLAGS: &[char] = &['i', 'm', 's', 'x', 'U'];

/// [`PatternPolicy`] for patterns written as delimited regular expressions.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegexPatternPolicy;

impl PatternPolicy for RegexPatternPolicy {
    fn supports_pattern_type(&self, kind: Option<&str>) -> bool {
        kind == Some("regex")
    }

    fn generate_pattern(&self, step_text: &str) -> Pattern {
        let tokens = literal::tokenize(step_text);
        let count = tokens
            .iter()
            .filter(|t| matches!(t, Token::Literal { .. }))
            .count();
        let body = tokens
            .into_iter()
            .map(|t| match t {
                Token::Text(s) => ::regex::escape(s).replace('/', r"\/"),
                Token::Literal { kind, .. } => match kind {
                    LiteralKind::DoubleQuoted => r#""([^"]*)""#.to_owned(),
                    LiteralKind::SingleQuoted => r"'([^']*)'".to_owned(),
                    LiteralKind::Integer => r"(\d+)".to_owned(),
                },
            })
            .join("");

        Pattern::new(
            literal::canonical_text(step_text),
            format!("/^{body}$/"),
            count,
        )
    }

    fn supports_pattern(&self, pattern: &str) -> bool {
        split(pattern).is_some()
    }

    fn transform_pattern_to_regex(&self, pattern: &str) -> String {
        let Some((delimiter, body, flags)) = split(pattern) else {
            // Not delimited: treat the whole pattern as a regex body.
            return pattern.to_owned();
        };

        let inline = flags
            .chars()
            .filter(|f| INLINE_FLAGS.contains(f))
            .unique()
            .collect::<String>();
        let ignored = flags
            .chars()
            .filter(|f| !INLINE_FLAGS.contains(f))
            .collect::<String>();
        if !ignored.is_empty() {
            tracing::debug!(
                %pattern,
                %ignored,
                "regex modifiers without inline counterpart are ignored",
            );
        }

        let body = match delimiter {
            '{' => body.to_owned(),
            d => unescape(body, &[d]),
        };
        if inline.is_empty() {
            body
        } else {
            format!("(?{inline}){body}")
        }
    }
}

/// Splits a delimited `pattern` into its opening delimiter, body and trailing
/// flags.
///
/// Returns [`None`] if the `pattern` isn't delimited.
fn split(pattern: &str) -> Option<(char, &str, &str)> {
    let open = pattern.chars().next()?;
    let close = match open {
        '{' => '}',
        d if DELIMITERS.contains(&d) => d,
        _ => return None,
    };

    let start = open.len_utf8();
    let end = pattern[start..].rfind(close)? + start;
    let flags = &pattern[end + close.len_utf8()..];

    flags
        .chars()
        .all(|f| FLAGS.contains(&f))
        .then(|| (open, &pattern[start..end], flags))
}
