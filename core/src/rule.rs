//! `Rule` and `Group`: The compiled rule-tree
//!
//! A compiled template is a strict tree: a root [`Group`] whose children are
//! fields, literals and nested optional groups. Nothing in it changes after
//! [`compile`](crate::compile) returns.

use crate::{LiteralMatcher, PatternMatcher};
use std::fmt;
use std::sync::Arc;

/// One node of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// A named field, matched by the caller's pattern for that name.
    ///
    /// The pattern is shared between every occurrence of the same field name.
    Field {
        /// The field name as written in the template.
        name: String,
        /// The compiled, anchored field pattern.
        pattern: Arc<PatternMatcher>,
    },
    /// A separator that must appear verbatim.
    Literal(LiteralMatcher),
    /// A bracketed optional segment.
    Group(Group),
}

impl Rule {
    /// Returns `true` for fields and literals, the rules that must match.
    #[must_use]
    pub fn is_mandatory(&self) -> bool {
        !matches!(self, Self::Group(_))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field { name, .. } => f.write_str(name),
            Self::Literal(literal) => f.write_str(literal.text()),
            Self::Group(group) => write!(f, "[{group}]"),
        }
    }
}

/// An ordered sequence of rules matched as a unit.
///
/// The root group of a template is mandatory; every nested group is optional.
/// A group's `Display` renders its children back to template syntax, so the
/// root of a compiled template prints as the original template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    rules: Vec<Rule>,
}

impl Group {
    /// Create a group from its children, in template order.
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The group's children, in template order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the group has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Nesting depth of optional groups below this one.
    ///
    /// A group without nested groups has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.rules
            .iter()
            .filter_map(|rule| match rule {
                Rule::Group(group) => Some(1 + group.depth()),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Field names referenced anywhere in this group, in template order.
    ///
    /// A name that appears more than once is listed once, at its first
    /// occurrence.
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_field_names(&mut names);
        names
    }

    fn collect_field_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        for rule in &self.rules {
            match rule {
                Rule::Field { name, .. } => {
                    if !names.contains(&name.as_str()) {
                        names.push(name.as_str());
                    }
                }
                Rule::Literal(_) => {}
                Rule::Group(group) => group.collect_field_names(names),
            }
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.rules.iter().try_for_each(|rule| write!(f, "{rule}"))
    }
}
