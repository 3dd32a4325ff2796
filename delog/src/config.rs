//! Configuration loading from `.delog.toml`.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::CONFIG_FILENAME;

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The main configuration section for delog.
    pub delog: DelogConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during `load_from_path`, `None` if using defaults.
    #[serde(skip)]
    pub config_file_path: Option<std::path::PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Configuration options for delog.
pub struct DelogConfig {
    /// Call prefixes to excise (default: `console.`).
    pub patterns: Option<Vec<String>>,
    /// Call prefixes to audit with `check` (default: the console methods).
    pub check_patterns: Option<Vec<String>>,
    /// Literal substituted for each excised call (default: `void 0;`).
    pub replacement: Option<String>,
    /// Skip matches that begin inside a string literal.
    pub strict: Option<bool>,
    /// Re-audit rewritten files after `--apply` and fail if calls remain.
    pub verify: Option<bool>,
    /// List of folders to exclude from traversal.
    pub exclude_folders: Option<Vec<String>>,
    /// List of folders to force-include.
    pub include_folders: Option<Vec<String>>,
    /// Source file extensions to process (default: ts tsx js jsx mjs cjs).
    pub extensions: Option<Vec<String>>,
}

impl Config {
    /// Loads configuration from the default location (current directory,
    /// traversing up).
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let delog_toml = current.join(CONFIG_FILENAME);
            if delog_toml.exists() {
                if let Ok(content) = fs::read_to_string(&delog_toml) {
                    if let Ok(mut config) = toml::from_str::<Config>(&content) {
                        config.config_file_path = Some(delog_toml);
                        return config;
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }
}
