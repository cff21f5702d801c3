//! Matcher: Apply a rule-tree to input text
//!
//! # INV: Leaves are mandatory, groups are optional
//!
//! Inside a group, a field or literal that fails to match fails the whole
//! group. A nested group that fails is treated as absent: it contributes no
//! fields and leaves the cursor where it was.
//!
//! # INV: No backtracking
//!
//! Children are tried once, in template order. A field consumes as much as
//! its pattern matches (leftmost-first) and never gives any of it back, even
//! if a later sibling then fails.

use crate::{Fields, Group, PrefixMatcher, Rule};

/// Match `group` at the start of `text`.
///
/// Returns the fields captured inside the group (nested groups included) and
/// the unconsumed remainder of `text`, or `None` if a mandatory leaf failed.
/// On `None`, nothing the group captured is visible to the caller.
///
/// A leaf must consume at least one character: a pattern that can only
/// match the empty string at the cursor counts as no match. When a field
/// name occurs several times, the last successful capture wins.
///
/// # Example
///
/// ```
/// use dsn::{compile, match_group, tokenize};
/// use std::collections::BTreeMap;
///
/// let patterns = BTreeMap::from([
///     ("host".to_string(), r"[\w.]+".to_string()),
///     ("port".to_string(), r"\d+".to_string()),
/// ]);
/// let root = compile(&tokenize("host[:port]"), &patterns).unwrap();
///
/// let (fields, rest) = match_group(&root, "db.local:5432/app").unwrap();
/// assert_eq!(fields["port"], "5432");
/// assert_eq!(rest, "/app");
/// ```
pub fn match_group<'t>(group: &Group, text: &'t str) -> Option<(Fields, &'t str)> {
    let mut fields = Fields::new();
    let mut rest = text;

    for rule in group.rules() {
        match rule {
            Rule::Field { name, pattern } => {
                let len = consume(&**pattern, rest)?;
                fields.insert(name.clone(), rest[..len].to_owned());
                rest = &rest[len..];
            }
            Rule::Literal(literal) => {
                let len = consume(literal, rest)?;
                rest = &rest[len..];
            }
            Rule::Group(inner) => {
                // Optional: failure leaves `fields` and `rest` untouched.
                if let Some((inner_fields, next)) = match_group(inner, rest) {
                    fields.extend(inner_fields);
                    rest = next;
                }
            }
        }
    }

    Some((fields, rest))
}

/// Bytes a leaf consumes at the start of `input`, if it matches non-empty.
pub(crate) fn consume(matcher: &impl PrefixMatcher, input: &str) -> Option<usize> {
    matcher.match_len(input).filter(|&len| len > 0)
}
