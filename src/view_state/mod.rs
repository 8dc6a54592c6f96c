//! View-state layer - column buffers, screen index, and window bookkeeping
//!
//! # Module Structure
//!
//! - `row_index`: RowIndex - Fenwick-backed line to screen-row index
//! - `buffers`: ColumnBuffer, BufferManager - rendered entries and layout
//! - `surface`: Surface contract and the in-memory PadSurface
//! - `line_window`: LineWindowManager - file window, view window, cursor

pub mod buffers;
pub mod line_window;
pub mod row_index;
pub mod surface;

pub use buffers::{BufferManager, ColumnBuffer, ColumnId, ColumnSpec};
pub use line_window::{LineWindowManager, WindowLoader};
pub use row_index::RowIndex;
pub use surface::{PadSurface, Surface};
