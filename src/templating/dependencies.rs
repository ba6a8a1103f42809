//! Rendering of `<dependency>` elements.
//!
//! The block is built from two sources: the extra dependencies supplied in the
//! options, always first and in their given order, followed by the descriptor
//! dependencies that are active in the requested configurations. A descriptor
//! dependency with per-artifact overrides renders once per override.
//!
//! # Layout
//!
//! Every nesting level is one indentation unit deeper than the anchor line.
//! With the anchor at column 2 the output looks like this:
//!
//! ```text
//!     <dependency>
//!       <groupId>com.acme</groupId>
//!       <artifactId>util</artifactId>
//!       <version>1.0</version>
//!       <scope>compile</scope>
//!       <exclusions>
//!         <exclusion>
//!           <groupId>com.acme</groupId>
//!           <artifactId>legacy</artifactId>
//!         </exclusion>
//!       </exclusions>
//!     </dependency>
//! ```

use crate::constants::{DEFAULT_DEPENDENCY_TYPE, DEFAULT_INDENT_UNIT};
use crate::descriptor::{DependencyDescriptor, ExcludeRule, ModuleDescriptor};
use crate::templating::options::ExtraDependency;
use crate::templating::scope::ScopeMapping;
use crate::templating::selector::{effective_dependencies, scope_configurations};
use std::borrow::Cow;
use std::io::{self, Write};

/// Column arithmetic for a block anchored at a given column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indentation {
    base: usize,
    unit: usize,
}

impl Indentation {
    /// Anchor at `column`; the unit is the anchor's own indentation, or
    /// [`DEFAULT_INDENT_UNIT`] for an anchor at column 0.
    pub fn at_anchor(column: usize) -> Self {
        let unit = if column > 0 {
            column
        } else {
            DEFAULT_INDENT_UNIT
        };
        Self {
            base: column,
            unit,
        }
    }

    /// Leading whitespace for nesting level `n`.
    pub fn level(&self, n: usize) -> String {
        " ".repeat(self.base + n * self.unit)
    }
}

/// One `<dependency>` element, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomDependency<'a> {
    pub group_id: Cow<'a, str>,
    pub artifact_id: Cow<'a, str>,
    pub version: Option<Cow<'a, str>>,
    /// `None` for the default `jar` type
    pub dependency_type: Option<Cow<'a, str>>,
    pub classifier: Option<Cow<'a, str>>,
    pub scope: Option<Cow<'a, str>>,
    pub optional: bool,
    pub exclusions: &'a [ExcludeRule],
}

fn non_default_type(dependency_type: Option<&str>) -> Option<Cow<'_, str>> {
    dependency_type.filter(|t| *t != DEFAULT_DEPENDENCY_TYPE).map(Cow::Borrowed)
}

impl<'a> PomDependency<'a> {
    /// Element for an extra dependency; group and version default to the module's.
    pub fn from_extra(extra: &'a ExtraDependency, descriptor: &'a ModuleDescriptor) -> Self {
        Self {
            group_id: Cow::Borrowed(extra.group.as_deref().unwrap_or(descriptor.organisation())),
            artifact_id: Cow::Borrowed(&extra.artifact),
            version: extra.version.as_deref().or(descriptor.revision()).map(Cow::Borrowed),
            dependency_type: non_default_type(extra.dependency_type.as_deref()),
            classifier: extra.classifier.as_deref().map(Cow::Borrowed),
            scope: extra.scope.as_deref().map(Cow::Borrowed),
            optional: extra.optional,
            exclusions: &[],
        }
    }

    /// Elements for a descriptor dependency: one, or one per artifact override.
    pub fn from_descriptor(
        descriptor: &'a ModuleDescriptor,
        dependency: &'a DependencyDescriptor,
        mapping: &'a ScopeMapping,
    ) -> Vec<Self> {
        let resolved = mapping.resolve(&scope_configurations(descriptor, dependency));
        let base = Self {
            group_id: Cow::Borrowed(&dependency.organisation),
            artifact_id: Cow::Borrowed(&dependency.name),
            version: Some(Cow::Borrowed(&dependency.revision)),
            dependency_type: None,
            classifier: None,
            scope: resolved.scope.map(Cow::Borrowed),
            optional: resolved.optional,
            exclusions: &dependency.excludes,
        };

        if dependency.artifacts.is_empty() {
            return vec![base];
        }

        dependency
            .artifacts
            .iter()
            .map(|artifact| Self {
                artifact_id: artifact
                    .name
                    .as_deref()
                    .map_or_else(|| base.artifact_id.clone(), Cow::Borrowed),
                dependency_type: non_default_type(Some(artifact.artifact_type.as_str())),
                classifier: artifact.classifier().map(Cow::Borrowed),
                ..base.clone()
            })
            .collect()
    }

    /// Write the element with its opening tag at level 1 of `indentation`.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W, indentation: &Indentation) -> io::Result<()> {
        let outer = indentation.level(1);
        let inner = indentation.level(2);

        writeln!(out, "{outer}<dependency>")?;
        write_element(out, &inner, "groupId", &self.group_id)?;
        write_element(out, &inner, "artifactId", &self.artifact_id)?;
        if let Some(version) = &self.version {
            write_element(out, &inner, "version", version)?;
        }
        if let Some(dependency_type) = &self.dependency_type {
            write_element(out, &inner, "type", dependency_type)?;
        }
        if let Some(classifier) = &self.classifier {
            write_element(out, &inner, "classifier", classifier)?;
        }
        if let Some(scope) = &self.scope {
            write_element(out, &inner, "scope", scope)?;
        }
        if self.optional {
            write_element(out, &inner, "optional", "true")?;
        }
        if !self.exclusions.is_empty() {
            let exclusion = indentation.level(3);
            let fields = indentation.level(4);
            writeln!(out, "{inner}<exclusions>")?;
            for rule in self.exclusions {
                writeln!(out, "{exclusion}<exclusion>")?;
                write_element(out, &fields, "groupId", &rule.organisation)?;
                write_element(out, &fields, "artifactId", &rule.module)?;
                writeln!(out, "{exclusion}</exclusion>")?;
            }
            writeln!(out, "{inner}</exclusions>")?;
        }
        writeln!(out, "{outer}</dependency>")
    }
}

fn write_element<W: Write + ?Sized>(out: &mut W, indent: &str, tag: &str, text: &str) -> io::Result<()> {
    writeln!(out, "{indent}<{tag}>{}</{tag}>", escape_xml(text))
}

/// Escape the characters that cannot appear in XML element text.
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Everything that ends up inside the dependencies section of one POM.
#[derive(Debug)]
pub struct DependencyBlock<'a> {
    descriptor: &'a ModuleDescriptor,
    configurations: &'a [String],
    mapping: &'a ScopeMapping,
    extras: &'a [ExtraDependency],
}

impl<'a> DependencyBlock<'a> {
    /// `configurations` are the already expanded configuration names.
    pub fn new(
        descriptor: &'a ModuleDescriptor,
        configurations: &'a [String],
        mapping: &'a ScopeMapping,
        extras: &'a [ExtraDependency],
    ) -> Self {
        Self {
            descriptor,
            configurations,
            mapping,
            extras,
        }
    }

    /// Elements in output order: extras, then effective descriptor dependencies.
    pub fn entries(&self) -> Vec<PomDependency<'a>> {
        let mut entries: Vec<PomDependency<'a>> =
            self.extras.iter().map(|extra| PomDependency::from_extra(extra, self.descriptor)).collect();
        for dependency in effective_dependencies(self.descriptor, self.configurations) {
            entries.extend(PomDependency::from_descriptor(self.descriptor, dependency, self.mapping));
        }
        entries
    }

    /// Write every element, optionally inside a `<dependencies>` wrapper at
    /// level 0. Returns the number of elements written; an empty block
    /// writes nothing, wrapper included.
    pub fn write_to<W: Write + ?Sized>(
        &self,
        out: &mut W,
        indentation: &Indentation,
        wrap: bool,
    ) -> io::Result<usize> {
        let entries = self.entries();
        if entries.is_empty() {
            return Ok(0);
        }

        if wrap {
            writeln!(out, "{}<dependencies>", indentation.level(0))?;
        }
        for entry in &entries {
            entry.write_to(out, indentation)?;
        }
        if wrap {
            writeln!(out, "{}</dependencies>", indentation.level(0))?;
        }
        Ok(entries.len())
    }
}
