//! Mapping from module configurations to Maven dependency scopes.
//!
//! A dependency may be active in several configurations, but a `<dependency>`
//! element has exactly one scope. The lookup walks the dependency's own
//! configurations in declaration order and takes the first one that has an
//! entry in the table, so `[compile, test]` maps to `compile` and
//! `[test, compile]` maps to `test`. Entries are never merged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scope label plus whether the dependency is marked `<optional>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ScopeEntrySpec")]
pub struct ScopeEntry {
    pub scope: String,
    pub optional: bool,
}

impl ScopeEntry {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            optional: false,
        }
    }

    pub fn optional(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            optional: true,
        }
    }
}

/// `compile = "compile"` or `extras = { scope = "compile", optional = true }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ScopeEntrySpec {
    Scope(String),
    Detailed {
        scope: String,
        #[serde(default)]
        optional: bool,
    },
}

impl From<ScopeEntrySpec> for ScopeEntry {
    fn from(spec: ScopeEntrySpec) -> Self {
        match spec {
            ScopeEntrySpec::Scope(scope) => Self::new(scope),
            ScopeEntrySpec::Detailed {
                scope,
                optional,
            } => Self {
                scope,
                optional,
            },
        }
    }
}

/// Result of a scope lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedScope<'a> {
    /// `None` means no `<scope>` element
    pub scope: Option<&'a str>,
    pub optional: bool,
}

/// Configuration name to scope table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeMapping {
    scopes: BTreeMap<String, ScopeEntry>,
}

impl ScopeMapping {
    /// An empty table: nothing maps, every dependency renders without a scope.
    pub fn empty() -> Self {
        Self {
            scopes: BTreeMap::new(),
        }
    }

    /// The built-in table: the five Maven scopes map to themselves, none optional.
    pub fn default_mapping() -> Self {
        ["compile", "runtime", "provided", "test", "system"]
            .into_iter()
            .fold(Self::empty(), |mapping, scope| mapping.with_scope(scope, scope))
    }

    #[must_use]
    pub fn with_scope(mut self, configuration: impl Into<String>, scope: impl Into<String>) -> Self {
        self.scopes.insert(configuration.into(), ScopeEntry::new(scope));
        self
    }

    #[must_use]
    pub fn with_optional_scope(
        mut self,
        configuration: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        self.scopes.insert(configuration.into(), ScopeEntry::optional(scope));
        self
    }

    pub fn insert(&mut self, configuration: impl Into<String>, entry: ScopeEntry) {
        self.scopes.insert(configuration.into(), entry);
    }

    pub fn get(&self, configuration: &str) -> Option<&ScopeEntry> {
        self.scopes.get(configuration)
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// First table entry among `configurations`, in their order.
    pub fn resolve<S: AsRef<str>>(&self, configurations: &[S]) -> ResolvedScope<'_> {
        configurations
            .iter()
            .find_map(|conf| self.scopes.get(conf.as_ref()))
            .map_or(
                ResolvedScope {
                    scope: None,
                    optional: false,
                },
                |entry| ResolvedScope {
                    scope: Some(entry.scope.as_str()),
                    optional: entry.optional,
                },
            )
    }

    pub fn scope<S: AsRef<str>>(&self, configurations: &[S]) -> Option<&str> {
        self.resolve(configurations).scope
    }

    pub fn is_optional<S: AsRef<str>>(&self, configurations: &[S]) -> bool {
        self.resolve(configurations).optional
    }
}

impl Default for ScopeMapping {
    fn default() -> Self {
        Self::default_mapping()
    }
}
