//! Configuration loading and types for keyscribe
//!
//! Configuration is loaded in layers:
//! 1. Built-in defaults
//! 2. Config file (~/.config/keyscribe/config.toml)
//! 3. Environment variables (KEYSCRIBE_*)
//! 4. CLI arguments (highest priority)

use crate::error::KeyscribeError;
use crate::output::ExportFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file content
pub const DEFAULT_CONFIG: &str = r#"# Keyscribe Configuration
#
# Location: ~/.config/keyscribe/config.toml
# All settings can be overridden via CLI flags

[output]
# Directory for result files
# "auto" writes next to the input log
directory = "auto"

# Result format: "json" or "text"
# - json: {"source", "generated_at", "sentences"} document
# - text: one sentence per line
format = "json"

# Result file name prefix; a UTC timestamp and extension are appended
file_prefix = "parsed_keystrokes"

# Indent JSON output
pretty = true
"#;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
}

/// Result output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Output directory, or "auto" for the input log's directory
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Result format
    #[serde(default)]
    pub format: ExportFormat,

    /// File name prefix for result files
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Indent JSON output
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_directory() -> String {
    "auto".to_string()
}

fn default_file_prefix() -> String {
    "parsed_keystrokes".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            format: ExportFormat::default(),
            file_prefix: default_file_prefix(),
            pretty: true,
        }
    }
}

impl OutputConfig {
    /// Resolve the output directory
    /// Returns None for "auto" (write next to the input log)
    pub fn resolve_directory(&self) -> Option<PathBuf> {
        match self.directory.trim() {
            "" => None,
            dir if dir.eq_ignore_ascii_case("auto") => None,
            dir => Some(PathBuf::from(dir)),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "keyscribe")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Load configuration from file, with defaults for missing values
pub fn load_config(path: Option<&Path>) -> Result<Config, KeyscribeError> {
    // Start with defaults
    let mut config = Config::default();

    // Determine config file path
    let config_path = path.map(PathBuf::from).or_else(Config::default_path);

    // Load from file if it exists
    if let Some(ref path) = config_path {
        if path.exists() {
            tracing::debug!("Loading config from {:?}", path);
            let contents = std::fs::read_to_string(path)
                .map_err(|e| KeyscribeError::Config(format!("Failed to read config: {}", e)))?;

            config = toml::from_str(&contents)
                .map_err(|e| KeyscribeError::Config(format!("Invalid config: {}", e)))?;
        } else {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
        }
    }

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());

    Ok(config)
}

/// Render a configuration as TOML that `load_config` reads back
pub fn to_toml(config: &Config) -> Result<String, KeyscribeError> {
    toml::to_string_pretty(config)
        .map_err(|e| KeyscribeError::Config(format!("Cannot render config: {}", e)))
}

/// Override from environment variables
fn apply_env_overrides(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(dir) = var("KEYSCRIBE_OUTPUT_DIR") {
        config.output.directory = dir;
    }
    if let Some(format) = var("KEYSCRIBE_FORMAT") {
        match ExportFormat::parse(&format) {
            Some(format) => config.output.format = format,
            None => tracing::warn!("Ignoring unknown KEYSCRIBE_FORMAT value {:?}", format),
        }
    }
}
