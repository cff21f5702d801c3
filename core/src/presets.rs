//! Ready-made templates.

use crate::{Template, TemplateError};

/// Template text of the [`uri`] preset.
pub const URI_TEMPLATE: &str = "[scheme://]host[:port]path[?query][#fragment]";

/// Field patterns of the [`uri`] preset.
pub const URI_FIELDS: &[(&str, &str)] = &[
    ("scheme", r"\w+"),
    ("host", r"[\w.]+"),
    ("port", r"\d+"),
    ("path", r"[\w/.]+"),
    ("query", r"[^#]+"),
    ("fragment", r".+"),
];

/// A URL-shaped template: optional scheme, host, optional port, path,
/// optional query and optional fragment.
///
/// # Errors
///
/// Never fails in practice; the `Result` comes from [`Template::new`].
///
/// # Example
///
/// ```
/// let uri = dsn::presets::uri().unwrap();
/// let fields = uri.parse("https://www.google.com/search?q=dsn#top").unwrap();
/// assert_eq!(fields["host"], "www.google.com");
/// assert_eq!(fields["query"], "q=dsn");
/// assert_eq!(fields["fragment"], "top");
/// ```
pub fn uri() -> Result<Template, TemplateError> {
    Template::new("uri", URI_TEMPLATE, URI_FIELDS.iter().copied())
}
