//! Per-project generation settings (`pomgen.toml`).
//!
//! A project configuration records the options a project always generates
//! its POM with, so that `pomgen make-pom` needs no flags in the common case.
//! Command-line flags still override every value here.
//!
//! ```toml
//! descriptor = "build/module.toml"
//! output = "target/pom.xml"
//! template = "pom.template"
//! license-header = "LICENSE-HEADER.txt"
//! confs = ["*(public)"]
//!
//! [scopes]
//! compile = "compile"
//! runtime = "runtime"
//! extras = { scope = "compile", optional = true }
//!
//! [[extra-dependencies]]
//! group = "org.slf4j"
//! artifact = "slf4j-api"
//! version = "2.0.13"
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use crate::config::parse_config;
use crate::core::file_error::{FileOperation, FileResultExt};
use crate::templating::{ExtraDependency, PomWriterOptions, ScopeMapping, TemplateSource};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
    /// File whose content becomes `${ivy.pom.license}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_header: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator_info: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packaging: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confs: Option<Vec<String>>,
    /// Replaces the built-in scope table entirely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scopes: Option<ScopeMapping>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_dependencies: Vec<ExtraDependency>,
}

impl ProjectConfig {
    /// Parse `path` and resolve its relative paths against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config: Self = parse_config(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.resolve_paths(base);
        tracing::debug!("Loaded project config from {}", path.display());
        Ok(config)
    }

    /// `path` when given, else `dir/pomgen.toml` when that file exists.
    pub fn load_optional(path: Option<&Path>, dir: &Path) -> Result<Option<Self>> {
        if let Some(path) = path {
            return Self::load(path).map(Some);
        }
        let candidate = dir.join(crate::constants::PROJECT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate).map(Some)
        } else {
            Ok(None)
        }
    }

    fn resolve_paths(&mut self, base: &Path) {
        for path in [
            &mut self.descriptor,
            &mut self.output,
            &mut self.template,
            &mut self.license_header,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Writer options described by this file, license header read from disk.
    pub fn writer_options(&self) -> Result<PomWriterOptions> {
        let mut options = PomWriterOptions::new();

        if let Some(template) = &self.template {
            options.template = TemplateSource::File(template.clone());
        }
        if let Some(path) = &self.license_header {
            options.license_header = Some(read_license_header(path)?);
        }
        if let Some(generator_info) = self.generator_info {
            options.print_generator_info = generator_info;
        }
        options.artifact_name = self.artifact_id.clone();
        options.artifact_packaging = self.packaging.clone();
        options.name = self.name.clone();
        options.description = self.description.clone();
        options.confs = self.confs.clone();
        options.mapping = self.scopes.clone();
        options.extra_dependencies = self.extra_dependencies.clone();

        Ok(options)
    }
}

/// Read a license header file.
fn read_license_header(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).with_file_context(
        FileOperation::Read,
        path,
        "license header",
        "config::project",
    )?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templating::ScopeEntry;
    use tempfile::TempDir;

    const FULL: &str = r#"
descriptor = "build/module.yaml"
output = "/abs/pom.xml"
template = "pom.template"
license-header = "HEADER.txt"
generator-info = false
artifact-id = "widget-core"
packaging = "jar"
name = "Widget"
description = "The widget"
confs = ["*", "!test"]

[scopes]
compile = "compile"
extras = { scope = "compile", optional = true }

[[extra-dependencies]]
artifact = "helper"
scope = "test"
"#;

    #[test]
    fn test_load_resolves_relative_paths() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pomgen.toml");
        std::fs::write(&path, FULL).unwrap();

        let config = ProjectConfig::load(&path).unwrap();

        assert_eq!(config.descriptor, Some(temp.path().join("build/module.yaml")));
        assert_eq!(config.output, Some(PathBuf::from("/abs/pom.xml")));
        assert_eq!(config.template, Some(temp.path().join("pom.template")));
        assert_eq!(config.confs, Some(vec!["*".to_string(), "!test".to_string()]));
        assert_eq!(config.extra_dependencies, vec![ExtraDependency::new("helper").with_scope("test")]);

        let scopes = config.scopes.unwrap();
        assert_eq!(scopes.get("extras"), Some(&ScopeEntry::optional("compile")));
        assert_eq!(scopes.get("runtime"), None);
    }

    #[test]
    fn test_writer_options_reads_license_header() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("HEADER.txt"), "<!-- MIT -->\n").unwrap();
        let path = temp.path().join("pomgen.toml");
        std::fs::write(&path, FULL).unwrap();

        let options = ProjectConfig::load(&path).unwrap().writer_options().unwrap();

        assert_eq!(options.license_header.as_deref(), Some("<!-- MIT -->\n"));
        assert!(!options.print_generator_info);
        assert_eq!(options.artifact_name.as_deref(), Some("widget-core"));
        assert_eq!(options.template, TemplateSource::File(temp.path().join("pom.template")));
        assert_eq!(options.extra_dependencies.len(), 1);
    }

    #[test]
    fn test_missing_license_header_is_an_error() {
        let temp = TempDir::new().unwrap();
        let config = ProjectConfig {
            license_header: Some(temp.path().join("absent.txt")),
            ..ProjectConfig::default()
        };

        let error = config.writer_options().unwrap_err();
        let file_error = error.downcast_ref::<crate::core::FileOperationError>().unwrap();
        assert_eq!(file_error.purpose, "license header");
        assert!(file_error.is_not_found());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pomgen.toml");
        std::fs::write(&path, "descripter = \"module.toml\"\n").unwrap();

        assert!(ProjectConfig::load(&path).is_err());
    }

    #[test]
    fn test_load_optional_looks_in_directory() {
        let temp = TempDir::new().unwrap();
        assert!(ProjectConfig::load_optional(None, temp.path()).unwrap().is_none());

        std::fs::write(temp.path().join("pomgen.toml"), "packaging = \"war\"\n").unwrap();
        let config = ProjectConfig::load_optional(None, temp.path()).unwrap().unwrap();
        assert_eq!(config.packaging.as_deref(), Some("war"));
    }
}
