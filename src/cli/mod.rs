//! Command-line interface for pomgen.
//!
//! # Available Commands
//!
//! - `make-pom` - Generate a POM from a module descriptor
//! - `template` - Print or save the built-in POM template for customisation
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Only report errors
//! - `--config` - Path to a global configuration file (also `POMGEN_CONFIG`)
//!
//! # Example
//!
//! ```bash
//! # Generate target/pom.xml from module.toml, leaving test dependencies out
//! pomgen make-pom --output target/pom.xml --confs '*,!test'
//!
//! # Start a custom template from the built-in one
//! pomgen template --output pom.template
//! ```
//!
//! Log output goes to stderr. Without `--verbose` or `--quiet`, the
//! `RUST_LOG` environment variable selects the level, defaulting to `warn`.

mod make_pom;
mod template;

use crate::constants::CONFIG_ENV_VAR;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Settings shared by every command.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Explicit log filter; `None` defers to `RUST_LOG`
    pub log_level: Option<String>,

    /// Suppress success output
    pub quiet: bool,

    /// Global configuration file overriding the default location
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Parser)]
#[command(
    name = "pomgen",
    about = "Generate Maven POM files from resolved module descriptors",
    version,
    author,
    long_about = "pomgen turns a resolved module descriptor into a Maven POM by streaming a \
                  template and injecting the module's dependencies."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the global configuration file
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a POM from a module descriptor
    MakePom(make_pom::MakePomCommand),

    /// Print or save the built-in POM template
    Template(template::TemplateCommand),
}

impl Cli {
    /// Execute the selected command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        init_logging(config.log_level.as_deref());
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            quiet: self.quiet,
            config_path: self.config.clone(),
        }
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::MakePom(cmd) => cmd.execute(&config).await,
            Commands::Template(cmd) => cmd.execute(&config).await,
        }
    }
}

/// Install the stderr log subscriber. Later calls are no-ops.
pub fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
