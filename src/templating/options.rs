//! Options controlling POM generation.

use crate::core::{PomgenError, Result};
use crate::templating::scope::ScopeMapping;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Cursor};
use std::path::PathBuf;

/// The template shipped with pomgen.
pub const BUILTIN_TEMPLATE: &str = include_str!("pom.template");

/// Where the template text comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateSource {
    #[default]
    Builtin,
    File(PathBuf),
    Inline(String),
}

impl TemplateSource {
    /// Open the template for line-by-line reading.
    pub fn open(&self) -> Result<Box<dyn BufRead>> {
        match self {
            Self::Builtin => Ok(Box::new(Cursor::new(BUILTIN_TEMPLATE.as_bytes()))),
            Self::Inline(text) => Ok(Box::new(Cursor::new(text.clone().into_bytes()))),
            Self::File(path) => {
                let file = std::fs::File::open(path).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        PomgenError::TemplateNotFound {
                            path: path.display().to_string(),
                        }
                    } else {
                        PomgenError::TemplateRead {
                            path: path.display().to_string(),
                            reason: e.to_string(),
                        }
                    }
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }

    /// Name used in error messages.
    pub fn label(&self) -> String {
        match self {
            Self::Builtin => "<built-in>".to_string(),
            Self::Inline(_) => "<inline>".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// A dependency written into the POM that the descriptor does not know about.
///
/// `group` and `version` default to the module's own organisation and revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ExtraDependency {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub artifact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub dependency_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default)]
    pub optional: bool,
}

impl ExtraDependency {
    pub fn new(artifact: impl Into<String>) -> Self {
        Self {
            group: None,
            artifact: artifact.into(),
            version: None,
            dependency_type: None,
            classifier: None,
            scope: None,
            optional: false,
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_type(mut self, dependency_type: impl Into<String>) -> Self {
        self.dependency_type = Some(dependency_type.into());
        self
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    #[must_use]
    pub fn as_optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Everything besides the descriptor and template that shapes the output.
#[derive(Debug, Clone)]
pub struct PomWriterOptions {
    pub template: TemplateSource,
    /// Emit a comment naming the generator and its version
    pub print_generator_info: bool,
    pub license_header: Option<String>,
    /// Overrides the module name as `artifactId`
    pub artifact_name: Option<String>,
    /// Overrides packaging inference
    pub artifact_packaging: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Configuration patterns; `None` publishes every configuration
    pub confs: Option<Vec<String>>,
    /// `None` uses [`ScopeMapping::default_mapping`]
    pub mapping: Option<ScopeMapping>,
    /// Written before descriptor dependencies, in this order
    pub extra_dependencies: Vec<ExtraDependency>,
}

impl Default for PomWriterOptions {
    fn default() -> Self {
        Self {
            template: TemplateSource::Builtin,
            print_generator_info: true,
            license_header: None,
            artifact_name: None,
            artifact_packaging: None,
            name: None,
            description: None,
            confs: None,
            mapping: None,
            extra_dependencies: Vec::new(),
        }
    }
}

impl PomWriterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_template(mut self, template: TemplateSource) -> Self {
        self.template = template;
        self
    }

    #[must_use]
    pub fn with_generator_info(mut self, print: bool) -> Self {
        self.print_generator_info = print;
        self
    }

    #[must_use]
    pub fn with_license_header(mut self, header: impl Into<String>) -> Self {
        self.license_header = Some(header.into());
        self
    }

    #[must_use]
    pub fn with_artifact_name(mut self, name: impl Into<String>) -> Self {
        self.artifact_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_packaging(mut self, packaging: impl Into<String>) -> Self {
        self.artifact_packaging = Some(packaging.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_confs<I, S>(mut self, confs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.confs = Some(confs.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_mapping(mut self, mapping: ScopeMapping) -> Self {
        self.mapping = Some(mapping);
        self
    }

    #[must_use]
    pub fn with_extra_dependency(mut self, dependency: ExtraDependency) -> Self {
        self.extra_dependencies.push(dependency);
        self
    }
}
