//! Configuration module.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    ResolvedConfig,
};

use crate::pipeline::ColumnKind;
use crate::plugins::PRINTABLE_SELECTOR;
use serde::Deserialize;

/// One static column: what it renders and the blank cells after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    /// Column transform.
    pub kind: ColumnKind,
    /// Gap after the column in cells.
    #[serde(default)]
    pub gap: usize,
}

impl ColumnConfig {
    /// Column of `kind` followed by `gap` cells.
    pub const fn new(kind: ColumnKind, gap: usize) -> Self {
        Self { kind, gap }
    }
}

/// Line number, hex and printable columns.
pub fn default_columns() -> Vec<ColumnConfig> {
    vec![
        ColumnConfig::new(ColumnKind::LineNumber, 2),
        ColumnConfig::new(ColumnKind::Hex, 4),
        ColumnConfig::new(ColumnKind::Printable, 4),
    ]
}

/// Settings a viewing session is built from.
///
/// The decoder column is always present and always last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Bytes rendered per file line; also the read chunk width.
    pub bytes_per_line: usize,
    /// Rows visible at once.
    pub viewport_height: usize,
    /// Initial pad capacity in rows.
    pub surface_capacity: usize,
    /// Static columns, left to right.
    pub columns: Vec<ColumnConfig>,
    /// Gap after the decoder column.
    pub decoder_gap: usize,
    /// Decoder selector active at startup.
    pub default_plugin: i64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            bytes_per_line: 8,
            viewport_height: 20,
            surface_capacity: 100,
            columns: default_columns(),
            decoder_gap: 0,
            default_plugin: PRINTABLE_SELECTOR,
        }
    }
}

impl ViewerConfig {
    /// Reject settings no session can run with.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if `bytes_per_line` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bytes_per_line == 0 {
            return Err(ConfigError::Invalid {
                field: "bytes_per_line",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
