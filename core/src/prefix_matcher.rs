//! `PrefixMatcher`: Anchored leaf matching
//!
//! Leaves of a compiled template only ever match at the cursor. A
//! `PrefixMatcher` answers one question: how many bytes at the start of the
//! remaining input does this leaf consume?
//!
//! # Available Matchers
//!
//! - [`LiteralMatcher`]: A separator from the template, matched verbatim
//! - [`PatternMatcher`]: A caller-supplied field pattern, anchored at the start

use regex::Regex;
use std::fmt::{self, Debug};

/// Matches at the very start of the input.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so a compiled template can be
/// shared across threads.
///
/// # Example
///
/// ```
/// use dsn::{LiteralMatcher, PrefixMatcher};
///
/// let matcher = LiteralMatcher::new("://");
/// assert_eq!(matcher.match_len("://host"), Some(3));
/// assert_eq!(matcher.match_len("host://"), None);
/// ```
pub trait PrefixMatcher: Send + Sync + Debug {
    /// Length in bytes of the match anchored at the start of `input`.
    ///
    /// Returns `None` if there is no match at offset 0. `Some(0)` is a valid
    /// answer for patterns that can match the empty string.
    fn match_len(&self, input: &str) -> Option<usize>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// Literal
// ═══════════════════════════════════════════════════════════════════════════════

/// Matches one exact string, such as the `://` between scheme and host.
///
/// Equivalent to an anchored regex of the escaped text, without paying for
/// a regex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralMatcher {
    text: String,
}

impl LiteralMatcher {
    /// Create a literal matcher for `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Returns the literal text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl PrefixMatcher for LiteralMatcher {
    fn match_len(&self, input: &str) -> Option<usize> {
        input
            .starts_with(self.text.as_str())
            .then_some(self.text.len())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Pattern
// ═══════════════════════════════════════════════════════════════════════════════

/// Matches a field pattern anchored at the start of the input.
///
/// Only a match starting at offset 0 counts, so top-level alternations such
/// as `a|b` stay anchored as a whole. Matching uses the
/// `regex` crate's leftmost-first semantics: `\d+` on `"8080/x"` consumes
/// `"8080"`.
///
/// # Example
///
/// ```
/// use dsn::{PatternMatcher, PrefixMatcher};
///
/// let port = PatternMatcher::new(r"\d+").unwrap();
/// assert_eq!(port.match_len("8080/search"), Some(4));
/// assert_eq!(port.match_len("/search"), None);
/// ```
#[derive(Clone)]
pub struct PatternMatcher {
    source: String,
    regex: Regex,
}

impl PatternMatcher {
    /// Compile `pattern` into an anchored matcher.
    ///
    /// The pattern is compiled as written, never spliced into a larger one;
    /// anchoring happens at match time.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the pattern is not valid `regex` syntax.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        Ok(Self {
            source: pattern.to_owned(),
            regex,
        })
    }

    /// Returns the pattern as the caller wrote it.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl PrefixMatcher for PatternMatcher {
    fn match_len(&self, input: &str) -> Option<usize> {
        // The leftmost match starts at 0 whenever any match does.
        self.regex
            .find(input)
            .filter(|m| m.start() == 0)
            .map(|m| m.end())
    }
}

impl Debug for PatternMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PatternMatcher").field(&self.source).finish()
    }
}

impl PartialEq for PatternMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for PatternMatcher {}
