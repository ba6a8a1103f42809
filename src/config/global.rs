//! User-wide pomgen configuration.
//!
//! The global configuration holds template variables shared by every project a
//! user generates POMs for, such as an organisation name or a license URL.
//!
//! ```toml
//! # ~/.pomgen/config.toml
//! environment-prefix = "env"
//!
//! [variables]
//! company = "Acme Corp"
//! license.url = "https://acme.example/LICENSE"
//! ```
//!
//! Nested tables are flattened with dots, so the second entry above is
//! available in templates as `${license.url}`.

use crate::templating::Variables;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Global configuration loaded from `~/.pomgen/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GlobalConfig {
    /// Base template variables.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, toml::Value>,

    /// When set, every environment variable `NAME` is also available as
    /// `${<prefix>.NAME}`. Configured variables win over environment values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_prefix: Option<String>,
}

impl GlobalConfig {
    /// Load from `path` when given, else from the default location.
    ///
    /// A missing file yields the default configuration.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No global config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read global config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse global config from {}", path.display()))?;
        tracing::debug!(
            "Loaded global config from {} ({} variables)",
            path.display(),
            config.variables.len()
        );
        Ok(config)
    }

    /// Platform path of the global configuration file.
    ///
    /// - **Windows**: `%LOCALAPPDATA%\pomgen\config.toml`
    /// - **Unix/macOS**: `~/.pomgen/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("pomgen")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".pomgen")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// The base variable layer for a generation run.
    pub fn base_variables(&self) -> Variables {
        let mut flat = HashMap::new();
        for (key, value) in &self.variables {
            flatten_value(key, value, &mut flat);
        }

        let variables = Variables::from_map(flat);
        match &self.environment_prefix {
            Some(prefix) => variables.with_environment(prefix),
            None => variables,
        }
    }
}

fn flatten_value(key: &str, value: &toml::Value, into: &mut HashMap<String, String>) {
    match value {
        toml::Value::String(s) => {
            into.insert(key.to_string(), s.clone());
        }
        toml::Value::Table(table) => {
            for (child, value) in table {
                flatten_value(&format!("{key}.{child}"), value, into);
            }
        }
        toml::Value::Array(items) => {
            let joined: Vec<String> = items
                .iter()
                .map(|item| match item {
                    toml::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            into.insert(key.to_string(), joined.join(","));
        }
        other => {
            into.insert(key.to_string(), other.to_string());
        }
    }
}
