//! Display surface contract and the in-memory pad.

use crate::model::SurfaceError;
use std::collections::BTreeSet;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Fixed-height scroll surface the buffers draw into.
///
/// Rows are addressed in pad coordinates; the visible offset selects which
/// `height` rows the terminal shows.
pub trait Surface {
    /// Write `text` at `(row, col)` into a column declared `width` cells wide.
    ///
    /// # Errors
    ///
    /// [`SurfaceError::TooWide`] if `text` is wider than `width`.
    fn draw_at(&mut self, row: usize, col: usize, text: &str, width: usize)
        -> Result<(), SurfaceError>;

    /// Set the first visible row.
    fn set_visible_offset(&mut self, row: usize);

    /// First visible row.
    fn visible_offset(&self) -> usize;

    /// Blank every row and drop the highlight.
    fn clear(&mut self);

    /// Highlight `rows` and place the cursor on `cursor_row`.
    fn highlight(&mut self, rows: BTreeSet<usize>, cursor_row: usize);

    /// Grow backing storage to at least `capacity` rows.
    fn grow_capacity(&mut self, capacity: usize);

    /// Rows of backing storage.
    fn capacity(&self) -> usize;

    /// Visible rows.
    fn height(&self) -> usize;
}

/// Row-oriented text pad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PadSurface {
    rows: Vec<String>,
    height: usize,
    offset: usize,
    highlighted: BTreeSet<usize>,
    cursor: usize,
}

impl PadSurface {
    /// Pad with `capacity` blank rows showing `height` at a time.
    pub fn new(capacity: usize, height: usize) -> Self {
        Self {
            rows: vec![String::new(); capacity],
            height,
            offset: 0,
            highlighted: BTreeSet::new(),
            cursor: 0,
        }
    }

    /// Blank pad with the same geometry.
    pub fn blank_like(&self) -> Self {
        Self::new(self.rows.len(), self.height)
    }

    /// Text of pad row `row`.
    pub fn row(&self, row: usize) -> Option<&str> {
        self.rows.get(row).map(String::as_str)
    }

    /// `(pad row, text)` for each row currently on screen.
    pub fn visible_rows(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        let end = (self.offset + self.height).min(self.rows.len());
        let start = self.offset.min(end);
        (start..end).map(move |row| (row, self.rows[row].as_str()))
    }

    /// Highlighted rows.
    pub fn highlighted(&self) -> &BTreeSet<usize> {
        &self.highlighted
    }

    /// Cursor row.
    pub fn cursor_row(&self) -> usize {
        self.cursor
    }

    /// Change the number of visible rows.
    pub fn set_height(&mut self, height: usize) {
        self.height = height;
    }
}

/// Byte index in `row` where display cell `col` begins, padding if short.
fn cell_to_byte(row: &mut String, col: usize) -> usize {
    let mut cells = 0;
    for (idx, ch) in row.char_indices() {
        if cells >= col {
            return idx;
        }
        cells += ch.width().unwrap_or(0);
    }
    if cells < col {
        row.extend(std::iter::repeat(' ').take(col - cells));
    }
    row.len()
}

impl Surface for PadSurface {
    fn draw_at(
        &mut self,
        row: usize,
        col: usize,
        text: &str,
        width: usize,
    ) -> Result<(), SurfaceError> {
        let text_width = text.width();
        if text_width > width {
            return Err(SurfaceError::TooWide {
                text_width,
                column_width: width,
            });
        }
        if row >= self.rows.len() {
            self.grow_capacity((self.rows.len().max(1) * 2).max(row + 1));
        }
        let line = &mut self.rows[row];
        let at = cell_to_byte(line, col);
        line.truncate(at);
        line.push_str(text);
        Ok(())
    }

    fn set_visible_offset(&mut self, row: usize) {
        self.offset = row;
    }

    fn visible_offset(&self) -> usize {
        self.offset
    }

    fn clear(&mut self) {
        self.rows.iter_mut().for_each(String::clear);
        self.highlighted.clear();
        self.offset = 0;
        self.cursor = 0;
    }

    fn highlight(&mut self, rows: BTreeSet<usize>, cursor_row: usize) {
        self.highlighted = rows;
        self.cursor = cursor_row;
    }

    fn grow_capacity(&mut self, capacity: usize) {
        if capacity > self.rows.len() {
            tracing::debug!(from = self.rows.len(), to = capacity, "growing pad capacity");
            self.rows.resize(capacity, String::new());
        }
    }

    fn capacity(&self) -> usize {
        self.rows.len()
    }

    fn height(&self) -> usize {
        self.height
    }
}
