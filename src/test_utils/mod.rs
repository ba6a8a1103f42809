//! Test utilities for pomgen
//!
//! Builders and fixtures for descriptors, plus logging setup for tests. The
//! module is compiled for unit tests and, through the `test-utils` feature,
//! for the integration tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use pomgen::descriptor::Configuration;
//! use pomgen::test_utils::DescriptorBuilder;
//!
//! let descriptor = DescriptorBuilder::new("com.acme", "widget", Some("1.2"))
//!     .configuration(Configuration::public("compile"))
//!     .dependency("com.acme", "util", "1.0", &["compile"])
//!     .build();
//! assert_eq!(descriptor.dependencies.len(), 1);
//! ```

pub mod builder;
pub mod fixtures;

pub use builder::DescriptorBuilder;
pub use fixtures::{SECTION_TEMPLATE, WEBAPP_DESCRIPTOR, WIDGET_DESCRIPTOR};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. With `None` the `RUST_LOG` environment
/// variable decides; without it, tests stay silent.
///
/// ```bash
/// RUST_LOG=pomgen=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
