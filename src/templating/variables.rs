//! Template variables and `${name}` substitution.
//!
//! Variables live in two layers. The base layer ([`Variables`]) holds values
//! that come from outside a single generation run: the `[variables]` table of
//! the global configuration and, optionally, the process environment. Each run
//! wraps it in an [`OverlayVariables`], and everything the generator sets goes
//! to the overlay only. A name set on the overlay always masks the base value,
//! so the generator can force values such as the delete sentinel regardless
//! of what the user configured, without touching the shared base.

use crate::core::{PomgenError, Result};
use regex::Regex;
use std::collections::HashMap;

/// Read/write access to named string variables.
pub trait VariableContainer {
    /// Look up a variable.
    fn variable(&self, name: &str) -> Option<&str>;

    /// Set a variable, replacing any previous value.
    fn set_variable(&mut self, name: &str, value: String);

    /// Whether the value of `name` is inserted as is, without substituting
    /// references inside it.
    fn is_literal(&self, _name: &str) -> bool {
        false
    }
}

/// A plain map of variables, used as the base layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    values: HashMap<String, String>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base variables from a configured table.
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self {
            values,
        }
    }

    /// Expose every environment variable as `<prefix>.<NAME>`.
    ///
    /// Existing entries win over environment values of the same name.
    #[must_use]
    pub fn with_environment(mut self, prefix: &str) -> Self {
        let prefix = prefix.trim_end_matches('.');
        for (key, value) in std::env::vars() {
            self.values.entry(format!("{prefix}.{key}")).or_insert(value);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl VariableContainer for Variables {
    fn variable(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    fn set_variable(&mut self, name: &str, value: String) {
        self.values.insert(name.to_string(), value);
    }
}

/// Per-run local layer over a borrowed base.
///
/// Writes never reach the base. The type is deliberately not `Clone`: a store
/// belongs to exactly one generation run.
pub struct OverlayVariables<'a> {
    base: &'a dyn VariableContainer,
    local: HashMap<String, String>,
}

impl<'a> OverlayVariables<'a> {
    pub fn new(base: &'a dyn VariableContainer) -> Self {
        Self {
            base,
            local: HashMap::new(),
        }
    }

    /// Whether `name` has been set on the overlay.
    pub fn is_local(&self, name: &str) -> bool {
        self.local.contains_key(name)
    }
}

impl VariableContainer for OverlayVariables<'_> {
    fn variable(&self, name: &str) -> Option<&str> {
        match self.local.get(name) {
            Some(value) => Some(value.as_str()),
            None => self.base.variable(name),
        }
    }

    fn set_variable(&mut self, name: &str, value: String) {
        self.local.insert(name.to_string(), value);
    }

    /// Overlay values come from the descriptor and options and are never expanded.
    fn is_literal(&self, name: &str) -> bool {
        self.is_local(name)
    }
}

impl std::fmt::Debug for OverlayVariables<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayVariables").field("local", &self.local).finish_non_exhaustive()
    }
}

/// Replaces `${name}` references with variable values.
///
/// Values are substituted recursively, so a configured variable may refer to
/// another one. Literal values (see [`VariableContainer::is_literal`]) are
/// inserted unchanged. Unknown names and unterminated `${` are left as they are.
#[derive(Debug, Clone)]
pub struct Substitutor {
    pattern: Regex,
}

impl Substitutor {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PomgenError::Other {
            message: format!("Failed to compile variable pattern: {e}"),
        })?;
        Ok(Self {
            pattern,
        })
    }

    /// Substitute every known variable in `text`.
    pub fn substitute(&self, text: &str, variables: &dyn VariableContainer) -> Result<String> {
        let mut chain = Vec::new();
        self.substitute_inner(text, variables, &mut chain)
    }

    fn substitute_inner<'t>(
        &self,
        text: &'t str,
        variables: &'t dyn VariableContainer,
        chain: &mut Vec<&'t str>,
    ) -> Result<String> {
        if !text.contains("${") {
            return Ok(text.to_string());
        }

        let mut result = String::with_capacity(text.len());
        let mut last = 0;
        for captures in self.pattern.captures_iter(text) {
            let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            result.push_str(&text[last..whole.start()]);
            last = whole.end();

            let name = name.as_str();
            let Some(value) = variables.variable(name) else {
                result.push_str(whole.as_str());
                continue;
            };
            if variables.is_literal(name) {
                result.push_str(value);
                continue;
            }

            if chain.contains(&name) {
                let mut cycle: Vec<&str> = chain.clone();
                cycle.push(name);
                return Err(PomgenError::CyclicVariable {
                    chain: cycle.join(" -> "),
                });
            }

            chain.push(name);
            let resolved = self.substitute_inner(value, variables, chain)?;
            chain.pop();
            result.push_str(&resolved);
        }
        result.push_str(&text[last..]);

        Ok(result)
    }
}
