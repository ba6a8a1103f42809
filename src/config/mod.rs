//! Configuration management for pomgen
//!
//! Two layers of configuration feed a generation run:
//!
//! 1. **Global Configuration** (`~/.pomgen/config.toml`): base template
//!    variables shared across projects, see [`GlobalConfig`].
//! 2. **Project Configuration** (`pomgen.toml`): the options one project
//!    always generates with, see [`ProjectConfig`].
//!
//! Command-line flags override the project configuration, which overrides the
//! built-in defaults. The global configuration only ever contributes
//! variables, and generated `ivy.pom.*` values always mask them.
//!
//! # Global Configuration Location
//!
//! - Unix/macOS: `~/.pomgen/config.toml`
//! - Windows: `%LOCALAPPDATA%\pomgen\config.toml`
//! - Override: `--config FILE` or the `POMGEN_CONFIG` environment variable

mod global;
mod parser;
mod project;

pub use global::GlobalConfig;
pub use parser::parse_config;
pub use project::ProjectConfig;
