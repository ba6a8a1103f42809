//! Fluent construction of module descriptors for tests.

use crate::descriptor::{
    Artifact, Configuration, DependencyArtifact, DependencyDescriptor, ExcludeRule,
    ModuleDescriptor,
};
use std::collections::BTreeMap;

/// A builder for [`ModuleDescriptor`] values that skips validation.
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    descriptor: ModuleDescriptor,
}

impl DescriptorBuilder {
    pub fn new(organisation: &str, name: &str, revision: Option<&str>) -> Self {
        Self {
            descriptor: ModuleDescriptor::new(organisation, name, revision.map(str::to_string)),
        }
    }

    pub fn home_page(mut self, url: &str) -> Self {
        self.descriptor.module.home_page = Some(url.to_string());
        self
    }

    pub fn configuration(mut self, configuration: Configuration) -> Self {
        self.descriptor.configurations.push(configuration);
        self
    }

    /// Add a published artifact without extra attributes.
    pub fn artifact(mut self, name: &str, artifact_type: &str) -> Self {
        self.descriptor.artifacts.push(Artifact {
            name: name.to_string(),
            artifact_type: artifact_type.to_string(),
            ext: None,
            extra: BTreeMap::new(),
        });
        self
    }

    pub fn classified_artifact(mut self, name: &str, artifact_type: &str, classifier: &str) -> Self {
        self.descriptor.artifacts.push(Artifact {
            name: name.to_string(),
            artifact_type: artifact_type.to_string(),
            ext: None,
            extra: BTreeMap::from([("classifier".to_string(), classifier.to_string())]),
        });
        self
    }

    /// Add a dependency edge; empty `confs` means every configuration.
    pub fn dependency(mut self, organisation: &str, name: &str, revision: &str, confs: &[&str]) -> Self {
        self.descriptor.dependencies.push(DependencyDescriptor {
            organisation: organisation.to_string(),
            name: name.to_string(),
            revision: revision.to_string(),
            confs: confs.iter().map(|c| (*c).to_string()).collect(),
            artifacts: Vec::new(),
            excludes: Vec::new(),
        });
        self
    }

    /// Attach an exclude rule to the most recently added dependency.
    pub fn exclude(mut self, organisation: &str, module: &str) -> Self {
        if let Some(dependency) = self.descriptor.dependencies.last_mut() {
            dependency.excludes.push(ExcludeRule {
                organisation: organisation.to_string(),
                module: module.to_string(),
            });
        }
        self
    }

    /// Attach an artifact override to the most recently added dependency.
    pub fn dependency_artifact(mut self, artifact_type: &str, classifier: Option<&str>) -> Self {
        if let Some(dependency) = self.descriptor.dependencies.last_mut() {
            let mut extra = BTreeMap::new();
            if let Some(classifier) = classifier {
                extra.insert("classifier".to_string(), classifier.to_string());
            }
            dependency.artifacts.push(DependencyArtifact {
                name: None,
                artifact_type: artifact_type.to_string(),
                ext: None,
                extra,
            });
        }
        self
    }

    pub fn dependency_with(mut self, dependency: DependencyDescriptor) -> Self {
        self.descriptor.dependencies.push(dependency);
        self
    }

    pub fn build(self) -> ModuleDescriptor {
        self.descriptor
    }
}
