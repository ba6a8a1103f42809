//! Utilities shared by the command-line layer and the generator.
//!
//! - [`fs`] - Directory creation for output paths

pub mod fs;

pub use fs::{ensure_dir, ensure_parent_dir};
