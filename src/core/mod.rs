//! Core types for pomgen
//!
//! This module holds the error plumbing shared by every other module:
//!
//! - [`PomgenError`] - the single error type returned by the generator
//! - [`ErrorContext`] - a user-facing wrapper with suggestions and details
//! - [`user_friendly_error`] - converts any [`anyhow::Error`] for CLI display
//! - [`file_error`] - attaches path and purpose context to [`std::io::Error`]
//!
//! # Error Flow
//!
//! The generator returns typed errors. The CLI adds `anyhow` context on the way
//! up and, in `main`, converts the final error with [`user_friendly_error`]
//! before exiting with status 1.

pub mod error;
pub mod file_error;

pub use error::{ErrorContext, PomgenError, Result, user_friendly_error};
pub use file_error::{FileOperation, FileOperationError, FileResultExt};
