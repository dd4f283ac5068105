//! Configuration file support for conda-tree.
//!
//! Provides YAML-based configuration through `conda-tree.config.yml` files,
//! including data structures, file loading, validation, and merging with
//! command-line flags.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::package_graph::policies::DEFAULT_COLLAPSE_PACKAGES;
use crate::shared::security::read_bounded_file;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "conda-tree.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Packages never expanded by `--small`
    pub collapse_packages: Option<Vec<String>>,
    /// Extra top-level prefix directories ignored by `unowned-files`
    pub skip_dirs: Option<Vec<String>>,
    /// Patterns pruned from the graph, added to `--exclude`
    pub exclude_packages: Option<Vec<String>>,
    pub strict_acyclic: Option<bool>,
    pub color: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Effective settings after merging the config file with CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub collapse_packages: Vec<String>,
    pub skip_dirs: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub strict_acyclic: bool,
    pub color: bool,
}

impl Settings {
    /// CLI flags win: `--no-color` forces color off, and `--exclude`
    /// patterns come after the configured ones.
    pub fn merge(config: Option<ConfigFile>, cli_excludes: Vec<String>, no_color: bool) -> Self {
        let config = config.unwrap_or_default();

        let mut exclude_patterns = config.exclude_packages.unwrap_or_default();
        for pattern in cli_excludes {
            if !exclude_patterns.contains(&pattern) {
                exclude_patterns.push(pattern);
            }
        }

        Self {
            collapse_packages: config.collapse_packages.unwrap_or_else(|| {
                DEFAULT_COLLAPSE_PACKAGES
                    .iter()
                    .map(|name| name.to_string())
                    .collect()
            }),
            skip_dirs: config.skip_dirs.unwrap_or_default(),
            exclude_patterns,
            strict_acyclic: config.strict_acyclic.unwrap_or(false),
            color: !no_color && config.color.unwrap_or(true),
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_bounded_file(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    let lists = [
        ("collapse_packages", &config.collapse_packages),
        ("skip_dirs", &config.skip_dirs),
        ("exclude_packages", &config.exclude_packages),
    ];

    for (field, entries) in lists {
        let Some(entries) = entries else { continue };
        for (i, entry) in entries.iter().enumerate() {
            if entry.trim().is_empty() {
                bail!(
                    "Invalid config: {}[{}] must not be empty.\n\n\
                     💡 Hint: Remove the empty entry or give it a package or directory name.",
                    field,
                    i
                );
            }
        }
    }

    if let Some(dirs) = &config.skip_dirs {
        if let Some(dir) = dirs.iter().find(|d| d.contains('/') || d.contains('\\')) {
            bail!(
                "Invalid config: skip_dirs entry '{}' must be a single directory name.\n\n\
                 💡 Hint: Only top-level directories of the prefix can be skipped.",
                dir
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!("Unknown config field '{}' will be ignored.", key);
    }
}
