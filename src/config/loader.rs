//! Configuration file loading with precedence handling.

use super::{default_columns, ColumnConfig, ViewerConfig};
use crate::plugins::PRINTABLE_SELECTOR;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "HEXVIEW_CONFIG";

/// Environment variable overriding `bytes_per_line`.
pub const BYTES_PER_LINE_ENV: &str = "HEXVIEW_BYTES_PER_LINE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown fields.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting holds a value no session can run with.
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Offending setting.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/hexview/config.toml`:
///
/// ```toml
/// bytes_per_line = 16
/// default_plugin = 1
///
/// [[columns]]
/// kind = "line-number"
/// gap = 2
///
/// [[columns]]
/// kind = "hex"
/// gap = 3
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Bytes per file line.
    #[serde(default)]
    pub bytes_per_line: Option<usize>,

    /// Visible rows; the terminal height decides when unset.
    #[serde(default)]
    pub viewport_height: Option<usize>,

    /// Initial pad capacity in rows.
    #[serde(default)]
    pub surface_capacity: Option<usize>,

    /// Static columns, left to right.
    #[serde(default)]
    pub columns: Option<Vec<ColumnConfig>>,

    /// Gap after the decoder column.
    #[serde(default)]
    pub decoder_gap: Option<usize>,

    /// Decoder selector active at startup.
    #[serde(default)]
    pub default_plugin: Option<i64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Bytes per file line.
    pub bytes_per_line: usize,
    /// Visible rows, `None` to follow the terminal.
    pub viewport_height: Option<usize>,
    /// Initial pad capacity.
    pub surface_capacity: usize,
    /// Static columns.
    pub columns: Vec<ColumnConfig>,
    /// Gap after the decoder column.
    pub decoder_gap: usize,
    /// Startup decoder selector.
    pub default_plugin: i64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            bytes_per_line: 8,
            viewport_height: None,
            surface_capacity: 100,
            columns: default_columns(),
            decoder_gap: 0,
            default_plugin: PRINTABLE_SELECTOR,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Session settings, using `terminal_rows` when no height is configured.
    pub fn viewer(&self, terminal_rows: usize) -> ViewerConfig {
        ViewerConfig {
            bytes_per_line: self.bytes_per_line,
            viewport_height: self.viewport_height.unwrap_or(terminal_rows),
            surface_capacity: self.surface_capacity,
            columns: self.columns.clone(),
            decoder_gap: self.decoder_gap,
            default_plugin: self.default_plugin,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/hexview/hexview.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("hexview").join("hexview.log"),
        None => PathBuf::from("hexview.log"),
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/hexview/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hexview").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `HEXVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/hexview/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Some(env_path) = std::env::var_os(CONFIG_ENV) {
        let env_path = PathBuf::from(env_path);
        if env_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV} is empty")));
        }
        return load_config_file(env_path);
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        bytes_per_line: config.bytes_per_line.unwrap_or(defaults.bytes_per_line),
        viewport_height: config.viewport_height.or(defaults.viewport_height),
        surface_capacity: config.surface_capacity.unwrap_or(defaults.surface_capacity),
        columns: config.columns.unwrap_or(defaults.columns),
        decoder_gap: config.decoder_gap.unwrap_or(defaults.decoder_gap),
        default_plugin: config.default_plugin.unwrap_or(defaults.default_plugin),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `HEXVIEW_BYTES_PER_LINE`. Values that are not unsigned integers
/// are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(bytes_per_line) = std::env::var(BYTES_PER_LINE_ENV)
        .ok()
        .and_then(|v| v.trim().parse().ok())
    {
        config.bytes_per_line = bytes_per_line;
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    bytes_per_line_override: Option<usize>,
    plugin_override: Option<i64>,
) -> ResolvedConfig {
    if let Some(bytes_per_line) = bytes_per_line_override {
        config.bytes_per_line = bytes_per_line;
    }

    if let Some(plugin) = plugin_override {
        config.default_plugin = plugin;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
