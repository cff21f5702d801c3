//! Parse trace types for debugging why an input did or did not match.
//!
//! Trace types mirror the rule-tree ([`Group`], [`Rule`]) but capture
//! outcomes instead of patterns. [`Template::parse`](crate::Template::parse)
//! stays strictly pass/fail; call
//! [`Template::parse_with_trace`](crate::Template::parse_with_trace) to see
//! where matching stopped.
//!
//! # Example
//!
//! ```
//! use dsn::{StepTrace, Template};
//!
//! let t = Template::new("hp", "host:port", [("host", r"\w+"), ("port", r"\d+")]).unwrap();
//! let trace = t.parse_with_trace("db:abc");
//! assert!(trace.result.is_none());
//!
//! // The last step of the root group is the one that failed.
//! let last = trace.root.steps.last().unwrap();
//! assert!(matches!(last, StepTrace::Field { name, matched: None, .. } if name == "port"));
//! ```

use crate::matcher::consume;
use crate::{Fields, Group, Rule};
use std::fmt;

/// Trace of a full parse.
///
/// # INV: `result` == `parse()` result
///
/// The `result` field always equals what
/// [`Template::parse`](crate::Template::parse) returns for the same input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTrace {
    /// The final result (identical to what `parse()` returns).
    pub result: Option<Fields>,
    /// Trace of the root group.
    pub root: GroupTrace,
}

/// Trace of one group.
///
/// Steps stop at the first mandatory leaf that failed, since matching stops
/// there too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTrace {
    /// Byte offset in the input where the group started.
    pub offset: usize,
    /// Whether the group matched.
    pub matched: bool,
    /// Each child that was tried, in template order.
    pub steps: Vec<StepTrace>,
}

/// One child of a group, as tried during the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepTrace {
    /// A field was tried at `offset`.
    Field {
        /// Field name.
        name: String,
        /// Byte offset in the input.
        offset: usize,
        /// The captured text, or `None` if the field did not match.
        matched: Option<String>,
    },
    /// A literal was tried at `offset`.
    Literal {
        /// The literal text.
        text: String,
        /// Byte offset in the input.
        offset: usize,
        /// Whether the literal matched.
        matched: bool,
    },
    /// A nested optional group.
    Group(GroupTrace),
}

impl StepTrace {
    /// Whether this step matched.
    #[must_use]
    pub fn matched(&self) -> bool {
        match self {
            Self::Field { matched, .. } => matched.is_some(),
            Self::Literal { matched, .. } => *matched,
            Self::Group(group) => group.matched,
        }
    }
}

impl fmt::Display for GroupTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

impl GroupTrace {
    fn write_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = "  ".repeat(indent);
        writeln!(f, "{pad}group @{} {}", self.offset, mark(self.matched))?;
        for step in &self.steps {
            match step {
                StepTrace::Field {
                    name,
                    offset,
                    matched,
                } => match matched {
                    Some(value) => writeln!(f, "{pad}  field {name} @{offset} = {value:?}")?,
                    None => writeln!(f, "{pad}  field {name} @{offset} {}", mark(false))?,
                },
                StepTrace::Literal {
                    text,
                    offset,
                    matched,
                } => writeln!(f, "{pad}  literal {text:?} @{offset} {}", mark(*matched))?,
                StepTrace::Group(group) => group.write_indented(f, indent + 1)?,
            }
        }
        Ok(())
    }
}

fn mark(matched: bool) -> &'static str {
    if matched {
        "ok"
    } else {
        "FAILED"
    }
}

/// Match `group` against `input[offset..]`, recording every step.
///
/// Same decisions as [`match_group`](crate::match_group); the trace is built
/// alongside.
pub(crate) fn trace_group(
    group: &Group,
    input: &str,
    offset: usize,
) -> (GroupTrace, Option<(Fields, usize)>) {
    let mut fields = Fields::new();
    let mut cursor = offset;
    let mut steps = Vec::with_capacity(group.len());

    for rule in group.rules() {
        let rest = &input[cursor..];
        match rule {
            Rule::Field { name, pattern } => {
                let len = consume(&**pattern, rest);
                steps.push(StepTrace::Field {
                    name: name.clone(),
                    offset: cursor,
                    matched: len.map(|len| rest[..len].to_owned()),
                });
                let Some(len) = len else {
                    return (failed(offset, steps), None);
                };
                fields.insert(name.clone(), rest[..len].to_owned());
                cursor += len;
            }
            Rule::Literal(literal) => {
                let len = consume(literal, rest);
                steps.push(StepTrace::Literal {
                    text: literal.text().to_owned(),
                    offset: cursor,
                    matched: len.is_some(),
                });
                let Some(len) = len else {
                    return (failed(offset, steps), None);
                };
                cursor += len;
            }
            Rule::Group(inner) => {
                let (inner_trace, inner_result) = trace_group(inner, input, cursor);
                steps.push(StepTrace::Group(inner_trace));
                if let Some((inner_fields, next)) = inner_result {
                    fields.extend(inner_fields);
                    cursor = next;
                }
            }
        }
    }

    let trace = GroupTrace {
        offset,
        matched: true,
        steps,
    };
    (trace, Some((fields, cursor)))
}

fn failed(offset: usize, steps: Vec<StepTrace>) -> GroupTrace {
    GroupTrace {
        offset,
        matched: false,
        steps,
    }
}
