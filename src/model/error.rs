//! Error types for hexview.
//!
//! Errors form a small hierarchy built with `thiserror`, composing through
//! `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level error returned from the binary's main logic
//!   - [`SessionError`] - failures of a viewing session
//!     - [`InputError`] - opening or reading the backing file
//!     - [`ColumnError`] - column buffers wired without output
//!     - [`SurfaceError`] - drawing outside a declared column width
//!     - [`PluginError`] - selecting a decoder that is not registered
//!     - `ConfigError` - viewer settings rejected by validation
//!   - `ConfigError`, `LoggingError` - startup failures
//!   - `std::io::Error` - terminal failures
//!
//! # Recovery Strategy
//!
//! [`WindowError`], [`ColumnError`] and [`SurfaceError`] indicate wiring bugs.
//! [`InputError`] is recoverable: the session keeps its previous view and the
//! shell shows an error state. [`AddressError`] never leaves
//! `HexSession::goto`; bad input is ignored.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// A viewing session failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing could not be initialised.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors raised by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading the backing file failed.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// A required column produced no entries.
    #[error(transparent)]
    Column(#[from] ColumnError),

    /// Drawing overflowed a column.
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    /// Plugin selection failed.
    #[error(transparent)]
    Plugin(#[from] PluginError),

    /// The viewer settings are unusable.
    #[error("Invalid viewer settings: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Errors encountered when opening or reading the backing file.
///
/// This is the recoverable I/O class: the caller of `load_file` or of a
/// file-window reload receives it and the previous view stays intact.
#[derive(Debug, Error)]
pub enum InputError {
    /// The file does not exist.
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use hexview::model::InputError;
    ///
    /// let err = InputError::FileNotFound { path: PathBuf::from("/tmp/missing.bin") };
    /// assert!(err.to_string().contains("/tmp/missing.bin"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// Any other I/O failure (permissions, read errors).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Checked [`Window`](super::Window) construction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WindowError {
    /// `start > end`.
    #[error("Window ends before it starts: {start}:{end}")]
    InvalidRange {
        /// Requested start.
        start: i64,
        /// Requested end.
        end: i64,
    },
}

/// Column widths were computed over a required column with no entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ColumnError {
    /// The column at `column` received nothing from the pipeline.
    #[error("Column {column} has no entries; pipeline is not wired to it")]
    EmptyColumn {
        /// Column position.
        column: usize,
    },
}

/// Drawing onto the display surface failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// Text is wider than the column it was drawn into.
    #[error("Text of width {text_width} exceeds column width {column_width}")]
    TooWide {
        /// Display width of the text.
        text_width: usize,
        /// Width declared by the caller.
        column_width: usize,
    },
}

/// A goto address could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Nothing was typed.
    #[error("Empty address")]
    Empty,

    /// The text is neither decimal nor hexadecimal.
    #[error("Invalid address: {input:?}")]
    Invalid {
        /// Text as typed.
        input: String,
    },
}

/// Decoder selection failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PluginError {
    /// No decoder is registered at that position.
    #[error("No decoder plugin registered for selector {selector}")]
    UnknownPlugin {
        /// Selector as requested.
        selector: i64,
    },
}
