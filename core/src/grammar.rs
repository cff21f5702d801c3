//! Grammar compiler: tokens plus field patterns to a rule-tree
//!
//! Builds the tree iteratively with an explicit stack of open groups. The
//! root group is implicit and can never be closed by a `]`.

use crate::{
    Group, LiteralMatcher, PatternMatcher, Rule, TemplateError, Token, TokenKind, MAX_DEPTH,
    MAX_PATTERN_LENGTH,
};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Compile a token sequence into the root [`Group`] of a template.
///
/// Every entry of `field_patterns` is compiled once, whether or not the
/// template uses it, so a bad pattern is always reported. Fields that appear
/// several times in the template share one compiled pattern.
///
/// # Errors
///
/// - [`TemplateError::InvalidPattern`] / [`TemplateError::PatternTooLong`] for a bad field pattern
/// - [`TemplateError::UnknownField`] if a name has no entry in `field_patterns`
/// - [`TemplateError::UnbalancedBrackets`] for a `]` with no open group
/// - [`TemplateError::UnclosedGroup`] for a `[` left open at the end
/// - [`TemplateError::DepthExceeded`] if groups nest deeper than [`MAX_DEPTH`]
///
/// # Example
///
/// ```
/// use dsn::{compile, tokenize};
/// use std::collections::BTreeMap;
///
/// let patterns = BTreeMap::from([("host".to_string(), r"[\w.]+".to_string())]);
/// let root = compile(&tokenize("host[/]"), &patterns).unwrap();
/// assert_eq!(root.len(), 2);
/// assert_eq!(root.to_string(), "host[/]");
/// ```
pub fn compile(
    tokens: &[Token<'_>],
    field_patterns: &BTreeMap<String, String>,
) -> Result<Group, TemplateError> {
    let patterns = compile_patterns(field_patterns)?;
    let mut builder = TreeBuilder::default();

    for token in tokens {
        match token.kind {
            TokenKind::Name => {
                let pattern =
                    patterns
                        .get(token.text)
                        .ok_or_else(|| TemplateError::UnknownField {
                            field: token.text.to_owned(),
                            offset: token.offset,
                        })?;
                builder.current().push(Rule::Field {
                    name: token.text.to_owned(),
                    pattern: Arc::clone(pattern),
                });
            }
            TokenKind::Separator => {
                builder
                    .current()
                    .push(Rule::Literal(LiteralMatcher::new(token.text)));
            }
            TokenKind::GroupOpen => builder.open(token.offset)?,
            TokenKind::GroupClose => builder.close(token.offset)?,
        }
    }

    builder.finish()
}

fn compile_patterns(
    field_patterns: &BTreeMap<String, String>,
) -> Result<BTreeMap<&str, Arc<PatternMatcher>>, TemplateError> {
    field_patterns
        .iter()
        .map(|(field, pattern)| {
            if pattern.len() > MAX_PATTERN_LENGTH {
                return Err(TemplateError::PatternTooLong {
                    field: field.clone(),
                    len: pattern.len(),
                    max: MAX_PATTERN_LENGTH,
                });
            }
            let matcher =
                PatternMatcher::new(pattern).map_err(|e| TemplateError::InvalidPattern {
                    field: field.clone(),
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })?;
            Ok((field.as_str(), Arc::new(matcher)))
        })
        .collect()
}

/// An open `[` and the rules collected since.
struct Frame {
    offset: usize,
    rules: Vec<Rule>,
}

/// Frame stack. `root` is the bottom frame and is never popped.
#[derive(Default)]
struct TreeBuilder {
    root: Vec<Rule>,
    open: Vec<Frame>,
}

impl TreeBuilder {
    fn current(&mut self) -> &mut Vec<Rule> {
        match self.open.last_mut() {
            Some(frame) => &mut frame.rules,
            None => &mut self.root,
        }
    }

    fn open(&mut self, offset: usize) -> Result<(), TemplateError> {
        let depth = self.open.len() + 1;
        if depth > MAX_DEPTH {
            return Err(TemplateError::DepthExceeded {
                depth,
                max: MAX_DEPTH,
            });
        }
        self.open.push(Frame {
            offset,
            rules: Vec::new(),
        });
        Ok(())
    }

    fn close(&mut self, offset: usize) -> Result<(), TemplateError> {
        let frame = self
            .open
            .pop()
            .ok_or(TemplateError::UnbalancedBrackets { offset })?;
        self.current().push(Rule::Group(Group::new(frame.rules)));
        Ok(())
    }

    fn finish(self) -> Result<Group, TemplateError> {
        match self.open.last() {
            Some(frame) => Err(TemplateError::UnclosedGroup {
                offset: frame.offset,
            }),
            None => Ok(Group::new(self.root)),
        }
    }
}
