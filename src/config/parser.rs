//! Generic TOML configuration parsing with file path context.

use anyhow::{Context, Result};
use std::path::Path;

/// Read `path` and deserialize it as TOML.
///
/// Both failure modes carry the file path:
///
/// ```text
/// Failed to parse config file: /path/to/pomgen.toml
/// Caused by:
///     unknown field `licence`, expected one of ...
/// ```
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: T = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}
