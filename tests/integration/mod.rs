//! Integration test suite for pomgen
//!
//! End-to-end tests that run the `pomgen` binary in scratch directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **make_pom**: POM generation, option precedence and error reporting
//! - **template**: Printing and saving the built-in template

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod make_pom;
mod template;
