//! Config types for loading templates from JSON/YAML.
//!
//! | Config type | Runtime type | Loader method |
//! |-------------|-------------|---------------|
//! | [`TemplateConfig`] | [`Template`] | [`TemplateConfig::build()`] |
//! | [`TemplateSetConfig`] | `Vec<Template>` | [`TemplateSetConfig::build()`] |
//!
//! ```yaml
//! templates:
//!   - name: uri
//!     template: "[scheme://]host[:port]path"
//!     fields:
//!       scheme: '\w+'
//!       host: '[\w.]+'
//!       port: '\d+'
//!       path: '[\w/.]+'
//! ```

use crate::{Template, TemplateError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for one [`Template`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Name used in logs and to select the template.
    pub name: String,

    /// Template text, e.g. `"[scheme://]host[:port]path"`.
    pub template: String,

    /// Field name → regex pattern.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl TemplateConfig {
    /// Compile this config into a [`Template`].
    ///
    /// # Errors
    ///
    /// Returns the [`TemplateError`] from [`Template::new`].
    pub fn build(&self) -> Result<Template, TemplateError> {
        Template::new(&self.name, &self.template, &self.fields)
    }
}

impl From<&Template> for TemplateConfig {
    fn from(template: &Template) -> Self {
        Self {
            name: template.name().to_owned(),
            template: template.template().to_owned(),
            fields: template.field_patterns().clone(),
        }
    }
}

/// A file's worth of templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSetConfig {
    /// Templates, in file order.
    pub templates: Vec<TemplateConfig>,
}

impl TemplateSetConfig {
    /// Compile every template, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first [`TemplateError`] encountered.
    pub fn build(&self) -> Result<Vec<Template>, TemplateError> {
        self.templates.iter().map(TemplateConfig::build).collect()
    }

    /// Find a template config by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TemplateConfig> {
        self.templates.iter().find(|t| t.name == name)
    }
}
