//! POM synthesis from a module descriptor and a line-oriented template.
//!
//! Generation is one synchronous pass over the template:
//!
//! 1. The requested configuration patterns are expanded against the
//!    descriptor ([`selector`]). A malformed pattern fails here, before the
//!    output file is created.
//! 2. The `ivy.pom.*` variables are populated on a per-run overlay over the
//!    caller's base variables ([`variables`]).
//! 3. The template is streamed line by line ([`engine`]); the dependency block
//!    ([`dependencies`]) is injected once at the dependencies anchor.
//!
//! # Template Variables
//!
//! | Variable | Value |
//! |----------|-------|
//! | `ivy.pom.license` | license header from the options |
//! | `ivy.pom.header` | generator comment, when enabled |
//! | `ivy.pom.groupId` | module organisation |
//! | `ivy.pom.artifactId` | artifact id override, else module name |
//! | `ivy.pom.packaging` | packaging override, else main artifact type, else `pom` |
//! | `ivy.pom.version` | module revision |
//! | `ivy.pom.name` | name from the options |
//! | `ivy.pom.description` | description from the options |
//! | `ivy.pom.url` | module home page |
//!
//! Every one of them starts out as the delete sentinel, so a template line
//! referring to a variable that received no value disappears from the output.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pomgen::descriptor::ModuleDescriptor;
//! use pomgen::templating::{PomWriterOptions, Variables, write_pom};
//! use std::path::Path;
//!
//! # async fn example() -> pomgen::core::Result<()> {
//! let descriptor = ModuleDescriptor::load(Path::new("module.toml")).await?;
//! let options = PomWriterOptions::new().with_confs(["*", "!test"]);
//! write_pom(&descriptor, Path::new("target/pom.xml"), &options, &Variables::new())?;
//! # Ok(())
//! # }
//! ```

pub mod dependencies;
pub mod engine;
pub mod options;
pub mod scope;
pub mod selector;
pub mod variables;


use crate::constants::{
    FALLBACK_PACKAGING, POM_VARIABLES, SKIP_LINE, VAR_ARTIFACT_ID, VAR_DESCRIPTION, VAR_GROUP_ID,
    VAR_HEADER, VAR_LICENSE, VAR_NAME, VAR_PACKAGING, VAR_URL, VAR_VERSION,
};
use crate::core::{PomgenError, Result};
use crate::descriptor::ModuleDescriptor;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

pub use dependencies::{DependencyBlock, Indentation, PomDependency};
pub use engine::{EngineState, TemplateEngine};
pub use options::{BUILTIN_TEMPLATE, ExtraDependency, PomWriterOptions, TemplateSource};
pub use scope::{ScopeEntry, ScopeMapping};
pub use selector::{ConfigurationPattern, expand_configurations};
pub use variables::{OverlayVariables, Substitutor, VariableContainer, Variables};

/// Set every `ivy.pom.*` variable for one run.
pub fn populate_variables(
    descriptor: &ModuleDescriptor,
    options: &PomWriterOptions,
    variables: &mut dyn VariableContainer,
) {
    for name in POM_VARIABLES {
        variables.set_variable(name, SKIP_LINE.to_string());
    }

    let artifact_id = options.artifact_name.as_deref().unwrap_or(descriptor.name());
    let packaging = options
        .artifact_packaging
        .as_deref()
        .or_else(|| descriptor.find_main_artifact(artifact_id).map(|a| a.artifact_type.as_str()))
        .unwrap_or(FALLBACK_PACKAGING);

    variables.set_variable(VAR_GROUP_ID, descriptor.organisation().to_string());
    variables.set_variable(VAR_ARTIFACT_ID, artifact_id.to_string());
    variables.set_variable(VAR_PACKAGING, packaging.to_string());

    if let Some(revision) = descriptor.revision() {
        variables.set_variable(VAR_VERSION, revision.to_string());
    }
    if let Some(name) = &options.name {
        variables.set_variable(VAR_NAME, name.clone());
    }
    if let Some(description) = &options.description {
        variables.set_variable(VAR_DESCRIPTION, description.clone());
    }
    if let Some(url) = descriptor.home_page() {
        variables.set_variable(VAR_URL, url.to_string());
    }
    if let Some(license) = &options.license_header {
        variables.set_variable(VAR_LICENSE, license.trim_end_matches('\n').to_string());
    }
    if options.print_generator_info {
        variables.set_variable(VAR_HEADER, generator_comment());
    }
}

fn generator_comment() -> String {
    format!(
        "<!--\n   Maven POM generated by {name}\n   {name} version: {version}\n-->",
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
    )
}

/// Stream `template` into `out` using the given options and base variables.
///
/// Configuration patterns are expanded before anything is written.
pub fn render_pom<R, W>(
    descriptor: &ModuleDescriptor,
    template: R,
    out: &mut W,
    options: &PomWriterOptions,
    base: &dyn VariableContainer,
) -> Result<()>
where
    R: BufRead,
    W: Write + ?Sized,
{
    let confs = expand_configurations(descriptor, options.confs.as_deref())?;
    render_expanded(descriptor, &confs, template, out, options, base, "<output>")
}

fn render_expanded<R, W>(
    descriptor: &ModuleDescriptor,
    confs: &[String],
    template: R,
    out: &mut W,
    options: &PomWriterOptions,
    base: &dyn VariableContainer,
    output_label: &str,
) -> Result<()>
where
    R: BufRead,
    W: Write + ?Sized,
{
    tracing::debug!(
        "Generating POM for {}:{} with configurations {:?}",
        descriptor.organisation(),
        descriptor.name(),
        confs
    );

    let mut variables = OverlayVariables::new(base);
    populate_variables(descriptor, options, &mut variables);

    let default_mapping;
    let mapping = match &options.mapping {
        Some(mapping) => mapping,
        None => {
            default_mapping = ScopeMapping::default_mapping();
            &default_mapping
        }
    };

    let block = DependencyBlock::new(descriptor, confs, mapping, &options.extra_dependencies);
    let mut engine = TemplateEngine::new(block)?;
    engine.run(template, out, &variables, &options.template.label(), output_label)
}

/// Render to an in-memory string.
pub fn render_pom_to_string(
    descriptor: &ModuleDescriptor,
    options: &PomWriterOptions,
    base: &dyn VariableContainer,
) -> Result<String> {
    let template = options.template.open()?;
    let mut out = Vec::new();
    render_pom(descriptor, template, &mut out, options, base)?;
    String::from_utf8(out).map_err(|e| PomgenError::Other {
        message: format!("Generated POM is not valid UTF-8: {e}"),
    })
}

/// Generate the POM at `output`, creating its parent directory when missing.
///
/// A failure while streaming may leave a partially written file behind.
pub fn write_pom(
    descriptor: &ModuleDescriptor,
    output: &Path,
    options: &PomWriterOptions,
    base: &dyn VariableContainer,
) -> Result<()> {
    let confs = expand_configurations(descriptor, options.confs.as_deref())?;
    let template = options.template.open()?;

    let output_label = output.display().to_string();
    let write_failed = |reason: String| PomgenError::OutputWrite {
        path: output_label.clone(),
        reason,
    };

    crate::utils::fs::ensure_parent_dir(output).map_err(|e| write_failed(format!("{e:#}")))?;
    let file = File::create(output).map_err(|e| write_failed(e.to_string()))?;
    let mut out = BufWriter::new(file);

    render_expanded(descriptor, &confs, template, &mut out, options, base, &output_label)?;
    out.flush().map_err(|e| write_failed(e.to_string()))?;

    tracing::debug!("Wrote {}", output_label);
    Ok(())
}
