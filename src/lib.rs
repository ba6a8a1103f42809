//! pomgen - Maven POM generation from resolved module descriptors
//!
//! A dependency resolution engine knows a module's coordinates, its published
//! artifacts, its configurations and its dependency edges. pomgen turns that
//! knowledge into a Maven POM by streaming a line-oriented template,
//! substituting `${ivy.pom.*}` variables and injecting one `<dependency>`
//! element per effective dependency.
//!
//! # Architecture Overview
//!
//! - The descriptor is read from a TOML, JSON or YAML file and never modified.
//! - Configuration patterns (`*`, `*(public)`, `!test`, ...) pick the
//!   configurations being published, and with them the dependencies.
//! - A scope table maps each dependency's configurations to a Maven scope.
//! - The template is processed one line at a time; lines whose variables got
//!   no value disappear, and the dependency block is injected at the
//!   `</dependencies>` anchor or, failing that, before `</project>`.
//!
//! # Core Modules
//!
//! - [`descriptor`] - Module descriptor model, loading and validation
//! - [`templating`] - Variables, scope mapping, dependency selection and POM rendering
//! - [`config`] - Global (`~/.pomgen/config.toml`) and project (`pomgen.toml`) configuration
//! - [`cli`] - Command-line interface
//! - [`core`] - Error types and user-facing error formatting
//! - [`utils`] - File system helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use pomgen::descriptor::ModuleDescriptor;
//! use pomgen::templating::{PomWriterOptions, Variables, render_pom_to_string};
//! use std::path::Path;
//!
//! # async fn example() -> pomgen::core::Result<()> {
//! let descriptor = ModuleDescriptor::load(Path::new("module.toml")).await?;
//! let pom = render_pom_to_string(&descriptor, &PomWriterOptions::new(), &Variables::new())?;
//! println!("{pom}");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod descriptor;
pub mod templating;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
