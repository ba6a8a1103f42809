//! Module configurations.
//!
//! A configuration is a named slice of a module (`compile`, `runtime`, `test`,
//! ...). In descriptor files it is written either as a bare name or as a table
//! with visibility and `extends`.

use serde::{Deserialize, Serialize};

/// Whether a configuration is meant for consumers of the module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// A declared module configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ConfigurationSpec")]
pub struct Configuration {
    pub name: String,
    #[serde(skip_serializing_if = "is_public")]
    pub visibility: Visibility,
    /// Configurations whose dependencies this one inherits
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Configuration {
    /// A public configuration that extends nothing.
    pub fn public(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            extends: Vec::new(),
            description: None,
        }
    }

    #[must_use]
    pub fn extending<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extends.extend(parents.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

fn is_public(visibility: &Visibility) -> bool {
    *visibility == Visibility::Public
}

/// On-disk shape: `"compile"` or `{ name = "test", extends = ["compile"] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ConfigurationSpec {
    Simple(String),
    Detailed(DetailedConfiguration),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DetailedConfiguration {
    name: String,
    #[serde(default)]
    visibility: Visibility,
    #[serde(default)]
    extends: Vec<String>,
    #[serde(default)]
    description: Option<String>,
}

impl From<ConfigurationSpec> for Configuration {
    fn from(spec: ConfigurationSpec) -> Self {
        match spec {
            ConfigurationSpec::Simple(name) => Self::public(name),
            ConfigurationSpec::Detailed(detailed) => Self {
                name: detailed.name,
                visibility: detailed.visibility,
                extends: detailed.extends,
                description: detailed.description,
            },
        }
    }
}
