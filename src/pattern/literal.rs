//! Literal tokens of a step text and the canonical text derived from it.
//!
//! A literal is a double-quoted span, a single-quoted span or a run of digits
//! an author typed into a step. Quoted spans have to be surrounded by
//! whitespace (or string edges), digit runs only have to be preceded by it.

use std::ops::Range;

use lazy_regex::{lazy_regex, regex, Lazy};
use regex::Regex;

/// Kind of a literal token.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LiteralKind {
    /// `"…"` span.
    DoubleQuoted,

    /// `'…'` span.
    SingleQuoted,

    /// Run of ASCII digits.
    Integer,
}

impl LiteralKind {
    /// [`LiteralKind`]s in the order they are extracted. An earlier kind wins,
    /// so `"42"` is a quoted literal and never an integer one.
    pub const PRECEDENCE: [Self; 3] =
        [Self::DoubleQuoted, Self::SingleQuoted, Self::Integer];

    fn regex(self) -> &'static Regex {
        static DOUBLE_QUOTED: Lazy<Regex> = lazy_regex!(r#""[^"]+""#);
        static SINGLE_QUOTED: Lazy<Regex> = lazy_regex!(r"'[^']+'");
        static INTEGER: Lazy<Regex> = lazy_regex!(r"[0-9]+");

        match self {
            Self::DoubleQuoted => &DOUBLE_QUOTED,
            Self::SingleQuoted => &SINGLE_QUOTED,
            Self::Integer => &INTEGER,
        }
    }

    const fn needs_trailing_boundary(self) -> bool {
        !matches!(self, Self::Integer)
    }
}

/// Piece of a tokenized step text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Token<'t> {
    /// Text in between literals.
    Text(&'t str),

    /// Literal token.
    Literal {
        /// Kind of the literal.
        kind: LiteralKind,

        /// Literal as written, quotes included.
        text: &'t str,

        /// 1-based extraction index. All double-quoted literals are numbered
        /// first, then single-quoted ones, then integers.
        index: usize,
    },
}

/// Splits the given `text` into [`Token`]s, in source order.
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    #[derive(Clone)]
    enum Segment {
        Text(Range<usize>),
        Literal(LiteralKind, Range<usize>, usize),
    }

    let mut segments = vec![Segment::Text(0..text.len())];
    let mut count = 0;

    for kind in LiteralKind::PRECEDENCE {
        segments = segments
            .into_iter()
            .flat_map(|seg| {
                let Segment::Text(range) = seg else {
                    return vec![seg];
                };

                let mut out = Vec::new();
                let mut cursor = range.start;
                for found in find_bounded(text, range.clone(), kind) {
                    if cursor < found.start {
                        out.push(Segment::Text(cursor..found.start));
                    }
                    count += 1;
                    cursor = found.end;
                    out.push(Segment::Literal(kind, found, count));
                }
                if cursor < range.end {
                    out.push(Segment::Text(cursor..range.end));
                }
                out
            })
            .collect();
    }

    segments
        .into_iter()
        .map(|seg| match seg {
            Segment::Text(r) => Token::Text(&text[r]),
            Segment::Literal(kind, r, index) => Token::Literal {
                kind,
                text: &text[r],
                index,
            },
        })
        .collect()
}

/// Finds literals of the given `kind` inside the `range` of the `text`,
/// checking boundaries against the whole `text`.
fn find_bounded(
    text: &str,
    range: Range<usize>,
    kind: LiteralKind,
) -> Vec<Range<usize>> {
    let haystack = &text[..range.end];
    let mut found = Vec::new();
    let mut pos = range.start;

    while let Some(m) = kind.regex().find_at(haystack, pos) {
        let leading = text[..m.start()]
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace);
        let trailing = !kind.needs_trailing_boundary()
            || text[m.end()..].chars().next().map_or(true, char::is_whitespace);

        if leading && trailing {
            found.push(m.range());
            pos = m.end();
        } else {
            // Retry right after the rejected start, like a backtracking
            // engine with look-arounds would.
            pos = m.start()
                + text[m.start()..].chars().next().map_or(1, char::len_utf8);
        }
        if pos >= range.end {
            break;
        }
    }
    found
}

/// Number of literal tokens in the given `text`.
#[must_use]
pub fn count(text: &str) -> usize {
    tokenize(text)
        .iter()
        .filter(|t| matches!(t, Token::Literal { .. }))
        .count()
}

/// Derives a canonical identifier from the given step `text`.
///
/// Literals are dropped and the rest is transliterated into ASCII. Then every
/// character except letters, underscores and whitespace is deleted, so
/// `user's` stays a single word, and the remaining words are joined in
/// `PascalCase`.
#[must_use]
pub fn canonical_text(text: &str) -> String {
    let stripped = tokenize(text)
        .into_iter()
        .filter_map(|t| match t {
            Token::Text(s) => Some(s),
            Token::Literal { .. } => None,
        })
        .collect::<String>();

    let ascii = deunicode::deunicode(&stripped);
    let words = regex!(r"[^A-Za-z_\s]+").replace_all(&ascii, "");

    words
        .split_whitespace()
        .map(|word| {
            let mut word = word.to_owned();
            if let Some(first) = word.get_mut(..1) {
                first.make_ascii_uppercase();
            }
            word
        })
        .collect()
}
