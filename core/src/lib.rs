//! dsn - Template-driven parser for structured identifiers
//!
//! Describe the shape of a DSN, URI or connection string once, as a template
//! with named fields, literal separators and `[...]` optional segments. Pair
//! every field with a regex for its legal values, and reuse the compiled
//! [`Template`] to pull those fields out of any number of inputs.
//!
//! # Pipeline
//!
//! ```text
//! "[scheme://]host[:port]path"
//!         ↓ tokenize()
//! [GroupOpen, Name(scheme), Separator(://), GroupClose, Name(host), ...]
//!         ↓ compile()            (once, at Template::new)
//! Group [ Group [Field scheme, Literal "://"], Field host, Group [...], Field path ]
//!         ↓ match_group()        (per input, at Template::parse)
//! { host: "www.google.com", path: "/search", ... }
//! ```
//!
//! # Matching Semantics
//!
//! 1. **Leaves are mandatory**: a field or literal that does not match at the
//!    cursor fails its whole group. Nothing the group captured survives.
//!
//! 2. **Groups are optional**: a bracketed group that fails is skipped. The
//!    cursor stays put and the enclosing group carries on.
//!
//! 3. **No backtracking**: there is exactly one path through a group. Once a
//!    leaf consumed input, no sibling can give it back.
//!
//! # Example
//!
//! ```
//! use dsn::Template;
//!
//! let uri = Template::new(
//!     "uri",
//!     "[scheme://]host[:port]path",
//!     [
//!         ("scheme", r"\w+"),
//!         ("host", r"[\w.]+"),
//!         ("port", r"\d+"),
//!         ("path", r"[\w/.]+"),
//!     ],
//! )
//! .unwrap();
//!
//! let fields = uri.parse("https://www.google.com:8080/search").unwrap();
//! assert_eq!(fields["scheme"], "https");
//! assert_eq!(fields["port"], "8080");
//!
//! let fields = uri.parse("www.google.com/search").unwrap();
//! assert!(!fields.contains_key("scheme"));
//! assert_eq!(fields["path"], "/search");
//! ```
//!
//! # Pattern Cost
//!
//! Field patterns come from the caller. They are compiled with the `regex`
//! crate, which matches in linear time, so a pattern like `(a+)+$` cannot
//! blow up. Pattern *size* is capped by [`MAX_PATTERN_LENGTH`].

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod grammar;
mod matcher;
mod prefix_matcher;
mod rule;
mod template;
mod token;
mod trace;

pub mod presets;

#[cfg(feature = "serde")]
mod config;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Pipeline stages
pub use grammar::compile;
pub use matcher::match_group;
pub use token::{tokenize, Token, TokenKind};

// Core types
pub use prefix_matcher::{LiteralMatcher, PatternMatcher, PrefixMatcher};
pub use rule::{Group, Rule};
pub use template::Template;

// Trace types
pub use trace::{GroupTrace, ParseTrace, StepTrace};

// Config (feature-gated)
#[cfg(feature = "serde")]
pub use config::{TemplateConfig, TemplateSetConfig};

/// Fields extracted by a successful parse, keyed by field name.
///
/// Ordered by name so printed and serialized results are stable.
pub type Fields = std::collections::BTreeMap<String, String>;

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use dsn::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Pipeline
        compile,
        match_group,
        tokenize,
        // Core types
        Fields,
        Group,
        // Trace types
        GroupTrace,
        // Matchers
        LiteralMatcher,
        ParseTrace,
        PatternMatcher,
        PrefixMatcher,
        Rule,
        StepTrace,
        Template,
        // Errors
        TemplateError,
        Token,
        TokenKind,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum nesting depth of `[...]` optional groups in a template.
///
/// Matching recurses once per group level, so this bounds stack usage.
/// Checked while the template compiles.
pub const MAX_DEPTH: usize = 32;

/// Maximum length in bytes of a single field pattern.
///
/// Regex compilation is expensive even with the linear-time `regex` crate,
/// and compiled program size grows with the pattern.
pub const MAX_PATTERN_LENGTH: usize = 4096;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from template construction.
///
/// All of these are raised by [`Template::new`], never by parsing. Parsing
/// only ever answers "matched" or "did not match".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// A `]` appeared with no open `[` to close.
    #[error("unbalanced brackets: `]` at offset {offset} closes no open group")]
    UnbalancedBrackets {
        /// Byte offset of the stray `]` in the template.
        offset: usize,
    },

    /// A `[` was still open when the template ended.
    #[error("unclosed group: `[` at offset {offset} is never closed; add a matching `]`")]
    UnclosedGroup {
        /// Byte offset of the innermost unclosed `[`.
        offset: usize,
    },

    /// The template names a field that has no pattern.
    #[error(
        "template references field \"{field}\" at offset {offset}, \
         but no pattern was supplied for it"
    )]
    UnknownField {
        /// The field name as written in the template.
        field: String,
        /// Byte offset of the field name in the template.
        offset: usize,
    },

    /// A field pattern failed to compile.
    #[error("invalid pattern for field \"{field}\" (\"{pattern}\"): {reason}")]
    InvalidPattern {
        /// The field the pattern belongs to.
        field: String,
        /// The pattern source that failed to compile.
        pattern: String,
        /// The underlying regex error message.
        reason: String,
    },

    /// Optional groups nest deeper than [`MAX_DEPTH`].
    #[error("group nesting depth is {depth}, but maximum allowed is {max}")]
    DepthExceeded {
        /// Depth reached when the limit tripped.
        depth: usize,
        /// Maximum allowed depth.
        max: usize,
    },

    /// A field pattern is longer than [`MAX_PATTERN_LENGTH`].
    #[error("pattern for field \"{field}\" is {len} bytes, but maximum allowed is {max}")]
    PatternTooLong {
        /// The field the pattern belongs to.
        field: String,
        /// Actual length of the pattern.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },
}
