//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against dsn templates.
//!
//! ```yaml
//! name: uri_full
//! description: Every optional group present
//! template: "[scheme://]host[:port]path"
//! fields:
//!   scheme: '\w+'
//!   host: '[\w.]+'
//!   port: '\d+'
//!   path: '[\w/.]+'
//! cases:
//!   - name: all parts
//!     input: "https://www.google.com:8080/search"
//!     expect: { scheme: https, host: www.google.com, port: "8080", path: /search }
//!   - name: empty input
//!     input: ""
//!     expect: ~
//! ```
//!
//! A fixture with `expect_error` checks that the template is rejected with
//! that error kind; its `cases` are not run.

use dsn::prelude::*;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub template: String,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// Error kind the template must be rejected with (see [`error_kind`]).
    #[serde(default)]
    pub expect_error: Option<String>,
    #[serde(default)]
    pub cases: Vec<TestCase>,
}

/// Test case
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub input: String,
    /// Expected fields, or `~` for no match.
    pub expect: Option<Fields>,
    /// Use [`Template::parse_exact`] instead of [`Template::parse`].
    #[serde(default)]
    pub exact: bool,
}

/// What a fixture observed: a parse result or a compile error kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Parsed(Option<Fields>),
    Rejected(String),
}

/// Stable kind name for a [`TemplateError`], as written in fixtures.
#[must_use]
pub fn error_kind(err: &TemplateError) -> &'static str {
    match err {
        TemplateError::UnbalancedBrackets { .. } => "unbalanced_brackets",
        TemplateError::UnclosedGroup { .. } => "unclosed_group",
        TemplateError::UnknownField { .. } => "unknown_field",
        TemplateError::InvalidPattern { .. } => "invalid_pattern",
        TemplateError::DepthExceeded { .. } => "depth_exceeded",
        TemplateError::PatternTooLong { .. } => "pattern_too_long",
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Builder: Convert fixture to a dsn Template
// ═══════════════════════════════════════════════════════════════════════════════

impl Fixture {
    /// Compile this fixture's template.
    ///
    /// # Errors
    ///
    /// Returns the [`TemplateError`] from [`Template::new`].
    pub fn build(&self) -> Result<Template, TemplateError> {
        Template::new(&self.name, &self.template, &self.fields)
    }
}

impl TestCase {
    /// Run this case against a compiled template.
    #[must_use]
    pub fn run(&self, template: &Template) -> Option<Fields> {
        if self.exact {
            template.parse_exact(&self.input)
        } else {
            template.parse(&self.input)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: Outcome,
    pub actual: Outcome,
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Run all test cases and return results
    ///
    /// A template that fails to compile yields one `compile` result.
    #[must_use]
    pub fn run(&self) -> Vec<CaseResult> {
        let template = match (self.build(), &self.expect_error) {
            (Ok(template), None) => template,
            (built, expected) => {
                let actual = match built {
                    Ok(_) => Outcome::Parsed(None),
                    Err(err) => Outcome::Rejected(error_kind(&err).to_owned()),
                };
                let expected = expected
                    .clone()
                    .map_or(Outcome::Parsed(None), Outcome::Rejected);
                return vec![CaseResult {
                    case_name: "compile".to_owned(),
                    passed: actual == expected,
                    expected,
                    actual,
                }];
            }
        };

        self.cases
            .iter()
            .map(|case| {
                let actual = Outcome::Parsed(case.run(&template));
                let expected = Outcome::Parsed(case.expect.clone());
                CaseResult {
                    case_name: case.name.clone(),
                    passed: actual == expected,
                    expected,
                    actual,
                }
            })
            .collect()
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self) {
        for result in self.run() {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {:?}, got {:?}",
                self.name, result.case_name, result.expected, result.actual
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;

    const HOST_PORT: &str = r#"
name: host_port
description: Optional port
template: "host[:port]"
fields:
  host: '\w+'
  port: '\d+'
cases:
  - name: with port
    input: "db:5432"
    expect: { host: db, port: "5432" }
  - name: without port
    input: "db"
    expect: { host: db }
  - name: trailing input rejected when exact
    input: "db:x"
    exact: true
    expect: ~
"#;

    #[test]
    fn test_fixture_passes() {
        let fixture = Fixture::from_yaml(HOST_PORT).unwrap();
        assert_eq!(fixture.cases.len(), 3);
        assert_eq!(
            fixture.cases[0].expect,
            Some(fields([("host", "db"), ("port", "5432")]))
        );
        assert!(fixture.run().iter().all(|r| r.passed));
    }

    #[test]
    fn test_fixture_reports_mismatch() {
        let yaml = r#"
name: wrong
template: "host"
fields: { host: '\d+' }
cases:
  - name: letters
    input: "abc"
    expect: { host: abc }
"#;
        let results = Fixture::from_yaml(yaml).unwrap().run();
        assert_eq!(results.len(), 1);
        assert!(!results[0].passed);
        assert_eq!(results[0].actual, Outcome::Parsed(None));
    }

    #[test]
    fn test_expected_compile_error() {
        let yaml = r#"
name: unclosed
template: "host[:port"
fields: { host: '\w+', port: '\d+' }
expect_error: unclosed_group
"#;
        let results = Fixture::from_yaml(yaml).unwrap().run();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].case_name, "compile");
        assert!(results[0].passed);
    }

    #[test]
    fn test_unexpected_compile_error_fails() {
        let yaml = r#"
name: unknown
template: "host"
cases: []
"#;
        let results = Fixture::from_yaml(yaml).unwrap().run();
        assert!(!results[0].passed);
        assert_eq!(
            results[0].actual,
            Outcome::Rejected("unknown_field".to_owned())
        );
    }

    #[test]
    fn test_multi_document() {
        let yaml = format!("{HOST_PORT}\n---\nname: lit\ntemplate: \"://\"\ncases: []\n");
        let fixtures = Fixture::from_yaml_multi(&yaml).unwrap();
        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[1].name, "lit");
    }
}
