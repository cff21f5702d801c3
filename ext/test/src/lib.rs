//! dsn-test: Test helpers and conformance fixtures for dsn templates
//!
//! Provides a terse way to build expected [`Fields`] and, behind the
//! `fixtures` feature, a runner for YAML conformance fixtures.
//!
//! # Example
//!
//! ```
//! use dsn_test::prelude::*;
//!
//! let t = Template::new("hp", "host[:port]", [("host", r"\w+"), ("port", r"\d+")]).unwrap();
//!
//! assert_eq!(t.parse("db:5432"), Some(fields([("host", "db"), ("port", "5432")])));
//! assert_eq!(t.parse("db"), Some(fields([("host", "db")])));
//! ```

use dsn::Fields;

#[cfg(feature = "fixtures")]
pub mod fixture;

/// Build a [`Fields`] map from `(name, value)` pairs.
#[must_use]
pub fn fields<I, K, V>(pairs: I) -> Fields
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::fields;
    pub use dsn::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_builder() {
        let f = fields([("host", "db"), ("port", "5432")]);
        assert_eq!(f.len(), 2);
        assert_eq!(f["host"], "db");
        assert_eq!(f.get("missing"), None);
    }

    #[test]
    fn test_fields_empty() {
        let f = fields(Vec::<(String, String)>::new());
        assert!(f.is_empty());
    }

    #[test]
    fn test_full_template() {
        let t = dsn::Template::new(
            "redis",
            "[scheme://][:password@]host[:port][/db]",
            [
                ("scheme", r"rediss?"),
                ("password", r"[^@]+"),
                ("host", r"[\w.-]+"),
                ("port", r"\d+"),
                ("db", r"\d+"),
            ],
        )
        .unwrap();

        assert_eq!(
            t.parse("rediss://:pw@cache.local:6380/2"),
            Some(fields([
                ("scheme", "rediss"),
                ("password", "pw"),
                ("host", "cache.local"),
                ("port", "6380"),
                ("db", "2"),
            ]))
        );
        assert_eq!(t.parse("cache"), Some(fields([("host", "cache")])));
    }
}
