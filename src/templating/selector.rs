//! Configuration patterns and dependency selection.
//!
//! A pattern list names the configurations being published. Each entry may
//! hold several comma separated items:
//!
//! | Item | Meaning |
//! |------|---------|
//! | `*` | every declared configuration |
//! | `*(public)` | every public configuration |
//! | `*(private)` | every private configuration |
//! | `!name` | remove `name` from the result |
//! | `name` | that configuration |
//!
//! Exclusions apply after everything else, whatever their position. A
//! dependency is effective when it is active in at least one of the expanded
//! configurations; the others are left out silently.

use crate::constants::ALL_CONFIGURATIONS;
use crate::core::{PomgenError, Result};
use crate::descriptor::{DependencyDescriptor, ModuleDescriptor, Visibility};
use std::collections::HashSet;
use std::str::FromStr;

/// One item of a configuration pattern list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationPattern {
    All,
    Visibility(Visibility),
    Named(String),
    Excluded(String),
}

impl FromStr for ConfigurationPattern {
    type Err = PomgenError;

    fn from_str(item: &str) -> Result<Self> {
        let malformed = |reason: &str| PomgenError::InvalidConfigurationPattern {
            pattern: item.to_string(),
            reason: reason.to_string(),
        };

        let item = item.trim();
        if item.is_empty() {
            return Err(malformed("empty configuration name"));
        }
        if item == ALL_CONFIGURATIONS {
            return Ok(Self::All);
        }
        if let Some(rest) = item.strip_prefix('*') {
            return match rest {
                "(public)" => Ok(Self::Visibility(Visibility::Public)),
                "(private)" => Ok(Self::Visibility(Visibility::Private)),
                _ => Err(malformed("expected '*', '*(public)' or '*(private)'")),
            };
        }

        let (excluded, name) = match item.strip_prefix('!') {
            Some(name) => (true, name),
            None => (false, item),
        };
        if name.is_empty() {
            return Err(malformed("'!' must be followed by a configuration name"));
        }
        if name.chars().any(|c| c.is_whitespace() || matches!(c, '*' | '!' | '(' | ')')) {
            return Err(malformed("configuration names cannot contain spaces, '*', '!' or parentheses"));
        }

        Ok(if excluded {
            Self::Excluded(name.to_string())
        } else {
            Self::Named(name.to_string())
        })
    }
}

/// Parse a pattern list, splitting entries on commas.
pub fn parse_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<ConfigurationPattern>> {
    patterns
        .iter()
        .flat_map(|entry| entry.as_ref().split(','))
        .map(ConfigurationPattern::from_str)
        .collect()
}

/// Expand patterns into concrete configuration names, without duplicates.
///
/// `None` selects every declared configuration. Names the module does not
/// declare are kept; they simply match no dependency.
pub fn expand_configurations<S: AsRef<str>>(
    descriptor: &ModuleDescriptor,
    patterns: Option<&[S]>,
) -> Result<Vec<String>> {
    let Some(patterns) = patterns else {
        return Ok(descriptor.configuration_names().into_iter().map(str::to_string).collect());
    };

    fn push(name: &str, selected: &mut Vec<String>) {
        if !selected.iter().any(|s| s == name) {
            selected.push(name.to_string());
        }
    }

    let mut selected: Vec<String> = Vec::new();
    let mut excluded: HashSet<String> = HashSet::new();

    for pattern in parse_patterns(patterns)? {
        match pattern {
            ConfigurationPattern::All => {
                for name in descriptor.configuration_names() {
                    push(name, &mut selected);
                }
            }
            ConfigurationPattern::Visibility(visibility) => {
                for name in descriptor.configuration_names_with_visibility(visibility) {
                    push(name, &mut selected);
                }
            }
            ConfigurationPattern::Named(name) => push(&name, &mut selected),
            ConfigurationPattern::Excluded(name) => {
                excluded.insert(name);
            }
        }
    }

    selected.retain(|name| !excluded.contains(name));
    Ok(selected)
}

/// `configuration` followed by everything it extends, transitively.
fn with_ancestors<'a>(descriptor: &'a ModuleDescriptor, configuration: &'a str) -> Vec<&'a str> {
    let mut seen = vec![configuration];
    let mut index = 0;
    while index < seen.len() {
        if let Some(declared) = descriptor.configuration(seen[index]) {
            for parent in &declared.extends {
                if !seen.contains(&parent.as_str()) {
                    seen.push(parent.as_str());
                }
            }
        }
        index += 1;
    }
    seen
}

/// Whether `dependency` is active when `configuration` is requested.
///
/// True when the dependency is declared in the configuration, in `*`, or in
/// any configuration it extends.
pub fn is_active_in(
    descriptor: &ModuleDescriptor,
    dependency: &DependencyDescriptor,
    configuration: &str,
) -> bool {
    let declared = dependency.module_configurations();
    if declared.contains(&ALL_CONFIGURATIONS) {
        return descriptor.configuration_names().contains(&configuration);
    }
    with_ancestors(descriptor, configuration).iter().any(|conf| declared.contains(conf))
}

/// The configurations a dependency's scope is looked up in, in order.
///
/// `*` (written or implied by an empty list) stands for every declared
/// configuration, in declaration order.
pub fn scope_configurations<'a>(
    descriptor: &'a ModuleDescriptor,
    dependency: &'a DependencyDescriptor,
) -> Vec<&'a str> {
    let mut configurations: Vec<&'a str> = Vec::new();
    for conf in dependency.module_configurations() {
        let expanded =
            if conf == ALL_CONFIGURATIONS { descriptor.configuration_names() } else { vec![conf] };
        for name in expanded {
            if !configurations.contains(&name) {
                configurations.push(name);
            }
        }
    }
    configurations
}

/// The requested configurations in which `dependency` is active.
pub fn dependency_configurations<'r>(
    descriptor: &ModuleDescriptor,
    dependency: &DependencyDescriptor,
    requested: &'r [String],
) -> Vec<&'r str> {
    requested
        .iter()
        .map(String::as_str)
        .filter(|conf| is_active_in(descriptor, dependency, conf))
        .collect()
}

/// Dependencies active in at least one requested configuration, in descriptor order.
pub fn effective_dependencies<'a>(
    descriptor: &'a ModuleDescriptor,
    requested: &[String],
) -> Vec<&'a DependencyDescriptor> {
    descriptor
        .dependencies
        .iter()
        .filter(|dependency| !dependency_configurations(descriptor, dependency, requested).is_empty())
        .collect()
}
