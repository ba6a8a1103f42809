//! Resolved module descriptors.
//!
//! A [`ModuleDescriptor`] is what a dependency resolution engine knows about one
//! publishable module after resolution: its coordinates, the artifacts it
//! publishes, the configurations it declares and its dependency edges. pomgen
//! never resolves anything itself; it reads a descriptor that was written by
//! the resolution step and treats it as read-only.
//!
//! # File Format
//!
//! Descriptors are read as TOML, JSON or YAML depending on the file extension
//! (see [`DescriptorFormat`]). The TOML form looks like this:
//!
//! ```toml
//! configurations = ["compile", { name = "test", extends = ["compile"], visibility = "private" }]
//!
//! [module]
//! organisation = "com.acme"
//! name = "widget"
//! revision = "1.2"
//! home-page = "https://acme.example/widget"
//!
//! [[artifacts]]
//! name = "widget"
//! type = "jar"
//!
//! [[dependencies]]
//! organisation = "com.acme"
//! name = "util"
//! revision = "1.0"
//! confs = ["compile"]
//!
//! [[dependencies.excludes]]
//! organisation = "com.acme"
//! module = "legacy"
//! ```
//!
//! A module that declares no configuration implicitly declares `default`, and
//! a dependency without `confs` is active in every module configuration.

pub mod configuration;

#[cfg(test)]
mod descriptor_tests;

use crate::constants::{ALL_CONFIGURATIONS, CLASSIFIER_ATTRIBUTE, DEFAULT_CONFIGURATION};
use crate::core::{FileOperation, FileResultExt, PomgenError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

pub use configuration::{Configuration, Visibility};

/// Serialization format of a descriptor file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorFormat {
    Toml,
    Json,
    Yaml,
}

impl DescriptorFormat {
    /// Pick the format from the file extension, defaulting to TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase) {
            Some(ext) if ext == "json" => Self::Json,
            Some(ext) if ext == "yaml" || ext == "yml" => Self::Yaml,
            _ => Self::Toml,
        }
    }
}

/// Identity of the module being published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ModuleInfo {
    pub organisation: String,
    pub name: String,
    /// Absent for unreleased or working modules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_page: Option<String>,
}

/// An artifact published by the module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Artifact {
    pub name: String,
    #[serde(rename = "type", default = "default_artifact_type")]
    pub artifact_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,
    /// Extra attributes such as `classifier`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Artifact {
    pub fn classifier(&self) -> Option<&str> {
        self.extra.get(CLASSIFIER_ATTRIBUTE).map(String::as_str)
    }
}

fn default_artifact_type() -> String {
    "jar".to_string()
}

/// A per-artifact override on a dependency edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyArtifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default = "default_artifact_type")]
    pub artifact_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl DependencyArtifact {
    pub fn classifier(&self) -> Option<&str> {
        self.extra.get(CLASSIFIER_ATTRIBUTE).map(String::as_str)
    }
}

/// Excludes `organisation:module` from the dependency's transitive graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExcludeRule {
    pub organisation: String,
    pub module: String,
}

/// A dependency edge of the module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyDescriptor {
    pub organisation: String,
    pub name: String,
    pub revision: String,
    /// Module configurations that activate this dependency, `*` for all
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub confs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<DependencyArtifact>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<ExcludeRule>,
}

impl DependencyDescriptor {
    /// The module configurations this dependency was declared in.
    ///
    /// An edge declared without configurations is active everywhere and reports `*`.
    pub fn module_configurations(&self) -> Vec<&str> {
        if self.confs.is_empty() {
            vec![ALL_CONFIGURATIONS]
        } else {
            self.confs.iter().map(String::as_str).collect()
        }
    }
}

/// A resolved module: identity, configurations, artifacts and dependency edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleDescriptor {
    pub module: ModuleInfo,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub configurations: Vec<Configuration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<DependencyDescriptor>,
}

impl ModuleDescriptor {
    /// Create a descriptor with no configurations, artifacts or dependencies.
    pub fn new(
        organisation: impl Into<String>,
        name: impl Into<String>,
        revision: Option<String>,
    ) -> Self {
        Self {
            module: ModuleInfo {
                organisation: organisation.into(),
                name: name.into(),
                revision,
                home_page: None,
            },
            configurations: Vec::new(),
            artifacts: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Load and validate a descriptor file, choosing the format from its extension.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_file_context(FileOperation::Read, path, "module descriptor", "descriptor")
            .map_err(|e| {
                if e.is_not_found() {
                    PomgenError::DescriptorNotFound {
                        path: path.display().to_string(),
                    }
                } else {
                    PomgenError::Other {
                        message: e.user_message(),
                    }
                }
            })?;

        Self::from_str_with_format(&content, DescriptorFormat::from_path(path)).map_err(|e| {
            match e {
                PomgenError::DescriptorParse {
                    reason,
                    ..
                } => PomgenError::DescriptorParse {
                    file: path.display().to_string(),
                    reason,
                },
                other => other,
            }
        })
    }

    /// Parse and validate descriptor text.
    pub fn from_str_with_format(content: &str, format: DescriptorFormat) -> Result<Self> {
        let parsed: std::result::Result<Self, String> = match format {
            DescriptorFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            DescriptorFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            DescriptorFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        };

        let descriptor = parsed.map_err(|reason| PomgenError::DescriptorParse {
            file: "<inline>".to_string(),
            reason,
        })?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Check internal consistency.
    ///
    /// Configuration names must be unique, and every `extends` entry and
    /// dependency configuration must name a declared configuration (or `*`).
    pub fn validate(&self) -> Result<()> {
        if self.module.organisation.trim().is_empty() {
            return Err(invalid("module organisation must not be empty"));
        }
        if self.module.name.trim().is_empty() {
            return Err(invalid("module name must not be empty"));
        }

        let mut declared = HashSet::new();
        for configuration in &self.configurations {
            let name = configuration.name.as_str();
            if name.is_empty()
                || name.contains([',', '*', '!'])
                || name.chars().any(char::is_whitespace)
            {
                return Err(invalid(format!("invalid configuration name '{name}'")));
            }
            if !declared.insert(name) {
                return Err(invalid(format!("configuration '{name}' is declared twice")));
            }
        }
        if declared.is_empty() {
            declared.insert(DEFAULT_CONFIGURATION);
        }

        for configuration in &self.configurations {
            if let Some(parent) = configuration.extends.iter().find(|p| !declared.contains(p.as_str())) {
                return Err(invalid(format!(
                    "configuration '{}' extends undeclared configuration '{parent}'",
                    configuration.name
                )));
            }
        }

        for artifact in &self.artifacts {
            if artifact.name.trim().is_empty() {
                return Err(invalid("artifact name must not be empty"));
            }
        }

        for dependency in &self.dependencies {
            let coordinates =
                format!("{}:{}:{}", dependency.organisation, dependency.name, dependency.revision);
            if dependency.organisation.trim().is_empty()
                || dependency.name.trim().is_empty()
                || dependency.revision.trim().is_empty()
            {
                return Err(invalid(format!(
                    "dependency '{coordinates}' needs an organisation, name and revision"
                )));
            }
            if let Some(conf) = dependency
                .confs
                .iter()
                .find(|c| c.as_str() != ALL_CONFIGURATIONS && !declared.contains(c.as_str()))
            {
                return Err(invalid(format!(
                    "dependency '{coordinates}' uses undeclared configuration '{conf}'"
                )));
            }
        }

        Ok(())
    }

    pub fn organisation(&self) -> &str {
        &self.module.organisation
    }

    pub fn name(&self) -> &str {
        &self.module.name
    }

    pub fn revision(&self) -> Option<&str> {
        self.module.revision.as_deref()
    }

    pub fn home_page(&self) -> Option<&str> {
        self.module.home_page.as_deref()
    }

    /// Declared configuration names in declaration order (`default` when none are declared).
    pub fn configuration_names(&self) -> Vec<&str> {
        if self.configurations.is_empty() {
            return vec![DEFAULT_CONFIGURATION];
        }
        self.configurations.iter().map(|c| c.name.as_str()).collect()
    }

    /// Names of the declared configurations with the given visibility.
    pub fn configuration_names_with_visibility(&self, visibility: Visibility) -> Vec<&str> {
        if self.configurations.is_empty() {
            return if visibility == Visibility::Public {
                vec![DEFAULT_CONFIGURATION]
            } else {
                Vec::new()
            };
        }
        self.configurations
            .iter()
            .filter(|c| c.visibility == visibility)
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn configuration(&self, name: &str) -> Option<&Configuration> {
        self.configurations.iter().find(|c| c.name == name)
    }

    /// First artifact called `name` that has no classifier.
    pub fn find_main_artifact(&self, name: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.name == name && a.classifier().is_none())
    }
}

fn invalid(reason: impl Into<String>) -> PomgenError {
    PomgenError::DescriptorValidation {
        reason: reason.into(),
    }
}
