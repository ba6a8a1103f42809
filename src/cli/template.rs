//! Print or save the built-in POM template.

use super::CliConfig;
use crate::core::{FileOperation, FileResultExt};
use crate::templating::BUILTIN_TEMPLATE;
use crate::utils::fs::ensure_parent_dir;
use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub struct TemplateCommand {
    /// Write the template to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(short, long)]
    force: bool,
}

impl TemplateCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let Some(output) = self.output else {
            print!("{BUILTIN_TEMPLATE}");
            return Ok(());
        };

        if output.exists() && !self.force {
            return Err(anyhow!(
                "{} already exists. Use --force to overwrite",
                output.display()
            ));
        }

        ensure_parent_dir(&output)?;
        tokio::fs::write(&output, BUILTIN_TEMPLATE)
            .await
            .with_file_context(FileOperation::Write, &output, "POM template", "cli::template")?;

        if !config.quiet {
            println!("{} Wrote template to {}", "✓".green(), output.display());
        }
        Ok(())
    }
}
