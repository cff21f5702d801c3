//! Tokenizer: template string to classified tokens
//!
//! Every character of the template lands in exactly one token, so joining
//! the token texts gives back the template. Bracket balance is not checked
//! here; that is the compiler's job.

use std::fmt;

/// What a [`Token`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A maximal run of word characters: a field placeholder.
    Name,
    /// A maximal run of anything that is neither a word character nor a bracket.
    Separator,
    /// A single `[`.
    GroupOpen,
    /// A single `]`.
    GroupClose,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Separator => "separator",
            Self::GroupOpen => "group-open",
            Self::GroupClose => "group-close",
        })
    }
}

/// A classified slice of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token classification.
    pub kind: TokenKind,
    /// The exact template text covered by this token.
    pub text: &'a str,
    /// Byte offset of `text` in the template.
    pub offset: usize,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.text)
    }
}

/// Split a template into tokens, left to right.
///
/// Word characters are exactly those matched by `\w` in the `regex` crate:
/// letters, combining marks, decimal digits and connector punctuation such
/// as `_`. An empty template yields no tokens.
///
/// # Example
///
/// ```
/// use dsn::{tokenize, TokenKind};
///
/// let tokens = tokenize("host[:port]");
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     [
///         TokenKind::Name,
///         TokenKind::GroupOpen,
///         TokenKind::Separator,
///         TokenKind::Name,
///         TokenKind::GroupClose,
///     ]
/// );
/// ```
#[must_use]
pub fn tokenize(template: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    while let Some(c) = template[offset..].chars().next() {
        let rest = &template[offset..];
        let (kind, len) = match c {
            '[' => (TokenKind::GroupOpen, 1),
            ']' => (TokenKind::GroupClose, 1),
            c if is_word(c) => (TokenKind::Name, run_len(rest, is_word)),
            _ => (TokenKind::Separator, run_len(rest, is_separator)),
        };

        tokens.push(Token {
            kind,
            text: &rest[..len],
            offset,
        });
        offset += len;
    }

    tokens
}

fn is_word(c: char) -> bool {
    regex_syntax::is_word_character(c)
}

fn is_separator(c: char) -> bool {
    !is_word(c) && c != '[' && c != ']'
}

// Byte length of the leading run of chars satisfying `pred`.
fn run_len(s: &str, pred: fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(s.len(), |(i, _)| i)
}
