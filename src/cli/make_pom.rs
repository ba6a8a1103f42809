//! Generate a POM from a module descriptor.
//!
//! Options are merged in this order, later sources winning:
//!
//! 1. built-in defaults (`module.toml` in, `pom.xml` out, every configuration,
//!    default scope table, built-in template);
//! 2. the project configuration (`--project-config`, or `./pomgen.toml` when
//!    present);
//! 3. command-line flags.
//!
//! # Examples
//!
//! ```bash
//! # Everything from ./pomgen.toml, or defaults
//! pomgen make-pom
//!
//! # Publish public configurations only, with a custom template
//! pomgen make-pom --confs '*(public)' --template build/pom.template
//!
//! # Repeat --confs or separate entries with commas
//! pomgen make-pom --confs compile --confs runtime
//! ```

use super::CliConfig;
use crate::config::{GlobalConfig, ProjectConfig};
use crate::constants::{DEFAULT_DESCRIPTOR_FILE, DEFAULT_OUTPUT_FILE};
use crate::descriptor::ModuleDescriptor;
use crate::templating::{PomWriterOptions, TemplateSource, write_pom};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Default)]
pub struct MakePomCommand {
    /// Module descriptor to read (TOML, JSON or YAML)
    #[arg(short, long)]
    descriptor: Option<PathBuf>,

    /// Where to write the POM
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Template file to use instead of the built-in one
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Project configuration file (default: ./pomgen.toml when present)
    #[arg(long)]
    project_config: Option<PathBuf>,

    /// Configuration patterns selecting the published dependencies
    #[arg(long = "confs", value_name = "PATTERNS")]
    confs: Vec<String>,

    /// Override the artifactId (default: module name)
    #[arg(long)]
    artifact_id: Option<String>,

    /// Override the packaging (default: inferred from the main artifact)
    #[arg(long)]
    packaging: Option<String>,

    /// Value for the <name> element
    #[arg(long)]
    name: Option<String>,

    /// Value for the <description> element
    #[arg(long)]
    description: Option<String>,

    /// File whose content is placed at the top of the POM
    #[arg(long, value_name = "FILE")]
    license_header: Option<PathBuf>,

    /// Leave out the generator comment
    #[arg(long)]
    no_generator_info: bool,
}

/// Fully merged inputs of one `make-pom` run.
#[derive(Debug)]
struct MakePomPlan {
    descriptor: PathBuf,
    output: PathBuf,
    options: PomWriterOptions,
}

impl MakePomCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let global = GlobalConfig::load_with_optional(config.config_path.clone()).await?;
        let project = ProjectConfig::load_optional(self.project_config.as_deref(), Path::new("."))?;
        let plan = self.plan(project)?;

        tracing::debug!(
            "Generating {} from {}",
            plan.output.display(),
            plan.descriptor.display()
        );

        let descriptor = ModuleDescriptor::load(&plan.descriptor).await?;
        let base = global.base_variables();
        write_pom(&descriptor, &plan.output, &plan.options, &base).with_context(|| {
            format!("Failed to generate POM for {}:{}", descriptor.organisation(), descriptor.name())
        })?;

        if !config.quiet {
            println!("{} Wrote {}", "✓".green(), plan.output.display());
        }
        Ok(())
    }

    /// Merge defaults, the project configuration and the flags.
    fn plan(self, project: Option<ProjectConfig>) -> Result<MakePomPlan> {
        let mut project = project.unwrap_or_default();
        if let Some(path) = self.license_header {
            project.license_header = Some(path);
        }
        let mut options = project.writer_options()?;

        if let Some(template) = self.template {
            options.template = TemplateSource::File(template);
        }
        if !self.confs.is_empty() {
            options.confs = Some(self.confs);
        }
        if let Some(artifact_id) = self.artifact_id {
            options.artifact_name = Some(artifact_id);
        }
        if let Some(packaging) = self.packaging {
            options.artifact_packaging = Some(packaging);
        }
        if let Some(name) = self.name {
            options.name = Some(name);
        }
        if let Some(description) = self.description {
            options.description = Some(description);
        }
        if self.no_generator_info {
            options.print_generator_info = false;
        }

        Ok(MakePomPlan {
            descriptor: self
                .descriptor
                .or(project.descriptor)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DESCRIPTOR_FILE)),
            output: self.output.or(project.output).unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
            options,
        })
    }
}
