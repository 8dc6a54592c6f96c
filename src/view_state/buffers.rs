//! Column buffers and the screen index.
//!
//! [`BufferManager`] owns one [`ColumnBuffer`] per display column. Pipeline
//! sinks refer to columns through [`ColumnId`] handles and deliver rows by
//! absolute file line; entries are stored by position within the loaded line
//! range so a line's value lands in the same slot no matter which branch
//! produced it first.

use super::row_index::RowIndex;
use super::surface::Surface;
use crate::model::{ColumnError, SurfaceError, Window};
use crate::pipeline::{ColumnSink, Rendered};
use std::ops::Range;

/// Handle of a column inside a [`BufferManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(usize);

impl ColumnId {
    /// Handle for the column at `index`.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the column, left to right.
    pub const fn get(self) -> usize {
        self.0
    }
}

/// Static layout of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Blank cells after the column.
    pub gap: usize,
    /// Whether every loaded line must have an entry.
    pub required: bool,
}

impl ColumnSpec {
    /// A column that must render every line.
    pub const fn required(gap: usize) -> Self {
        Self {
            gap,
            required: true,
        }
    }

    /// A column whose transform may decline to render.
    pub const fn optional(gap: usize) -> Self {
        Self {
            gap,
            required: false,
        }
    }
}

/// Rendered entries of one column for the loaded line range.
#[derive(Debug, Clone)]
pub struct ColumnBuffer {
    spec: ColumnSpec,
    entries: Vec<Option<Rendered>>,
    width: usize,
    offset: usize,
}

impl ColumnBuffer {
    fn new(spec: ColumnSpec) -> Self {
        Self {
            spec,
            entries: Vec::new(),
            width: 0,
            offset: 0,
        }
    }

    /// Entry at loaded position `pos`.
    pub fn entry(&self, pos: usize) -> Option<&Rendered> {
        self.entries.get(pos).and_then(Option::as_ref)
    }

    /// Number of positions holding an entry.
    pub fn filled(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Width in cells, valid after [`BufferManager::compute_widths`].
    pub fn width(&self) -> usize {
        self.width
    }

    /// X offset in cells, valid after [`BufferManager::compute_widths`].
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Column layout.
    pub fn spec(&self) -> ColumnSpec {
        self.spec
    }

    fn reset(&mut self, lines: usize) {
        self.entries.clear();
        self.entries.resize(lines, None);
    }

    fn rows_at(&self, pos: usize) -> usize {
        self.entry(pos).map_or(0, Rendered::row_count)
    }
}

/// All columns of the loaded line range plus the screen index built when
/// they are drawn.
#[derive(Debug, Clone)]
pub struct BufferManager {
    columns: Vec<ColumnBuffer>,
    first_line: u64,
    line_count: usize,
    index: RowIndex,
}

impl BufferManager {
    /// Manager for the given columns, left to right.
    pub fn new(specs: &[ColumnSpec]) -> Self {
        Self {
            columns: specs.iter().copied().map(ColumnBuffer::new).collect(),
            first_line: 0,
            line_count: 0,
            index: RowIndex::default(),
        }
    }

    /// Empty every column and prepare for the file lines in `lines`.
    pub fn begin(&mut self, lines: Window) {
        self.first_line = lines.start().max(0) as u64;
        self.line_count = lines.len() as usize;
        for column in &mut self.columns {
            column.reset(self.line_count);
        }
        self.index.clear();
    }

    /// Empty every column and forget the loaded range.
    pub fn clear(&mut self) {
        self.begin(Window::default());
    }

    /// Empty a single column, keeping the loaded range.
    pub fn clear_column(&mut self, column: ColumnId) {
        if let Some(buffer) = self.columns.get_mut(column.get()) {
            buffer.reset(self.line_count);
        }
    }

    /// Drop the entry of `column` for absolute file `line`.
    pub fn clear_entry(&mut self, column: ColumnId, line: u64) {
        let Some(pos) = self.position(line) else {
            return;
        };
        if let Some(buffer) = self.columns.get_mut(column.get()) {
            buffer.entries[pos] = None;
        }
    }

    /// The columns, left to right.
    pub fn columns(&self) -> &[ColumnBuffer] {
        &self.columns
    }

    /// Number of loaded lines.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Loaded file lines.
    pub fn loaded(&self) -> Window {
        Window::sized(self.first_line as i64, self.line_count as i64)
    }

    /// Entry of `column` for absolute file `line`.
    pub fn entry(&self, column: ColumnId, line: u64) -> Option<&Rendered> {
        let pos = self.position(line)?;
        self.columns.get(column.get())?.entry(pos)
    }

    fn position(&self, line: u64) -> Option<usize> {
        let pos = usize::try_from(line.checked_sub(self.first_line)?).ok()?;
        (pos < self.line_count).then_some(pos)
    }

    /// Compute every column's width and x offset.
    ///
    /// A required column without entries while lines are loaded is a wiring
    /// fault and reported as [`ColumnError::EmptyColumn`].
    pub fn compute_widths(&mut self) -> Result<(), ColumnError> {
        let mut x = 0;
        for (idx, column) in self.columns.iter_mut().enumerate() {
            if column.spec.required && self.line_count > 0 && column.filled() == 0 {
                return Err(ColumnError::EmptyColumn { column: idx });
            }
            column.width = column
                .entries
                .iter()
                .flatten()
                .map(Rendered::max_width)
                .max()
                .unwrap_or(0);
            column.offset = x;
            x += column.width + column.spec.gap;
        }
        Ok(())
    }

    /// Total width of all columns and gaps.
    pub fn total_width(&self) -> usize {
        self.columns
            .last()
            .map_or(0, |c| c.offset + c.width + c.spec.gap)
    }

    /// Draw every loaded line onto `surface` and rebuild the screen index.
    ///
    /// A line occupies as many rows as its tallest entry, and at least one.
    pub fn draw(&mut self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        surface.clear();
        self.index.clear();

        let mut row = 0;
        for pos in 0..self.line_count {
            let rows = self
                .columns
                .iter()
                .map(|c| c.rows_at(pos))
                .max()
                .unwrap_or(0)
                .max(1);

            let needed = row + rows;
            if needed > surface.capacity() {
                surface.grow_capacity((surface.capacity().max(1) * 2).max(needed));
            }

            for column in &self.columns {
                let Some(entry) = column.entry(pos) else {
                    continue;
                };
                for (k, text) in entry.as_rows().iter().enumerate() {
                    surface.draw_at(row + k, column.offset, text, column.width)?;
                }
            }

            self.index.push(rows);
            row = needed;
        }
        Ok(())
    }

    /// First screen row of absolute file `line`.
    ///
    /// The line just past the loaded range maps to [`screen_end`](Self::screen_end).
    pub fn line_to_screen_start(&self, line: u64) -> Option<usize> {
        let pos = usize::try_from(line.checked_sub(self.first_line)?).ok()?;
        (pos <= self.index.len()).then(|| self.index.start_of(pos))
    }

    /// Screen rows occupied by absolute file `line`.
    pub fn line_rows(&self, line: u64) -> Option<Range<usize>> {
        let pos = usize::try_from(line.checked_sub(self.first_line)?).ok()?;
        (pos < self.index.len()).then(|| {
            let start = self.index.start_of(pos);
            start..start + self.index.rows(pos)
        })
    }

    /// Absolute file line at or before screen `row`.
    ///
    /// Rows past the end map to the last loaded line.
    pub fn screen_to_line(&self, row: usize) -> Option<u64> {
        if self.index.is_empty() {
            return None;
        }
        let pos = self.index.line_at(row).unwrap_or(self.index.len() - 1);
        Some(self.first_line + pos as u64)
    }

    /// One past the last drawn screen row.
    pub fn screen_end(&self) -> usize {
        self.index.total()
    }
}

impl ColumnSink for BufferManager {
    fn accept(&mut self, column: ColumnId, line: u64, rows: Rendered) {
        let Some(pos) = self.position(line) else {
            tracing::debug!(line, column = column.get(), "dropping rows outside loaded range");
            return;
        };
        if let Some(buffer) = self.columns.get_mut(column.get()) {
            buffer.entries[pos] = Some(rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_state::surface::PadSurface;

    fn two_columns() -> BufferManager {
        BufferManager::new(&[ColumnSpec::required(2), ColumnSpec::optional(0)])
    }

    fn fill(manager: &mut BufferManager, first: i64, lines: &[(&str, &[&str])]) {
        manager.begin(Window::sized(first, lines.len() as i64));
        for (i, (left, right)) in lines.iter().enumerate() {
            let line = first as u64 + i as u64;
            manager.accept(ColumnId::new(0), line, Rendered::line(*left));
            if !right.is_empty() {
                let rows = right.iter().map(|s| s.to_string()).collect();
                manager.accept(ColumnId::new(1), line, Rendered::rows(rows));
            }
        }
    }

    #[test]
    fn widths_and_offsets_follow_widest_entry() {
        let mut manager = two_columns();
        fill(&mut manager, 0, &[("ab", &["x"]), ("abcd", &["xyz"])]);
        manager.compute_widths().unwrap();

        let cols = manager.columns();
        assert_eq!((cols[0].width(), cols[0].offset()), (4, 0));
        assert_eq!((cols[1].width(), cols[1].offset()), (3, 6));
        assert_eq!(manager.total_width(), 9);
    }

    #[test]
    fn required_column_without_entries_is_error() {
        let mut manager = two_columns();
        manager.begin(Window::sized(0, 2));
        manager.accept(ColumnId::new(1), 0, Rendered::line("only decoder"));
        assert_eq!(
            manager.compute_widths(),
            Err(ColumnError::EmptyColumn { column: 0 })
        );
    }

    #[test]
    fn optional_column_may_stay_empty() {
        let mut manager = two_columns();
        fill(&mut manager, 0, &[("a", &[]), ("b", &[])]);
        manager.compute_widths().unwrap();
        assert_eq!(manager.columns()[1].width(), 0);
    }

    #[test]
    fn empty_manager_has_zero_widths() {
        let mut manager = two_columns();
        manager.clear();
        manager.compute_widths().unwrap();
        assert_eq!(manager.total_width(), 2);
    }

    #[test]
    fn rows_outside_loaded_range_are_dropped() {
        let mut manager = two_columns();
        manager.begin(Window::sized(10, 2));
        manager.accept(ColumnId::new(0), 9, Rendered::line("early"));
        manager.accept(ColumnId::new(0), 12, Rendered::line("late"));
        manager.accept(ColumnId::new(0), 11, Rendered::line("in"));
        assert_eq!(manager.entry(ColumnId::new(0), 11), Some(&Rendered::line("in")));
        assert_eq!(manager.columns()[0].filled(), 1);
    }

    #[test]
    fn multi_row_entries_advance_screen_by_tallest_column() {
        let mut manager = two_columns();
        fill(
            &mut manager,
            4,
            &[("a", &["1"]), ("b", &["1", "2", "3"]), ("c", &[])],
        );
        manager.compute_widths().unwrap();
        let mut surface = PadSurface::new(10, 2);
        manager.draw(&mut surface).unwrap();

        assert_eq!(manager.screen_end(), 5);
        assert_eq!(manager.line_to_screen_start(4), Some(0));
        assert_eq!(manager.line_to_screen_start(5), Some(1));
        assert_eq!(manager.line_to_screen_start(6), Some(4));
        assert_eq!(manager.line_to_screen_start(7), Some(5));
        assert_eq!(manager.line_to_screen_start(8), None);
        assert_eq!(manager.line_rows(5), Some(1..4));

        assert_eq!(manager.screen_to_line(2), Some(5));
        assert_eq!(manager.screen_to_line(4), Some(6));
        assert_eq!(manager.screen_to_line(99), Some(6));

        assert_eq!(surface.row(1), Some("b  1"));
        assert_eq!(surface.row(2), Some("   2"));
    }

    #[test]
    fn screen_index_round_trips_every_loaded_line() {
        let mut manager = two_columns();
        fill(
            &mut manager,
            20,
            &[("a", &["1", "2"]), ("b", &[]), ("c", &["1"]), ("d", &["1", "2", "3"])],
        );
        manager.compute_widths().unwrap();
        let mut surface = PadSurface::new(10, 1);
        manager.draw(&mut surface).unwrap();

        for line in 20..24 {
            let row = manager.line_to_screen_start(line).unwrap();
            assert_eq!(manager.screen_to_line(row), Some(line));
        }
    }

    #[test]
    fn draw_grows_surface_capacity() {
        let mut manager = two_columns();
        let lines: Vec<(&str, &[&str])> = (0..9).map(|_| ("x", &[][..])).collect();
        fill(&mut manager, 0, &lines);
        manager.compute_widths().unwrap();
        let mut surface = PadSurface::new(5, 2);
        manager.draw(&mut surface).unwrap();
        assert!(surface.capacity() >= 9);
        assert_eq!(surface.capacity(), 10);
    }

    #[test]
    fn clear_column_keeps_other_columns() {
        let mut manager = two_columns();
        fill(&mut manager, 0, &[("a", &["1"])]);
        manager.clear_column(ColumnId::new(1));
        assert_eq!(manager.entry(ColumnId::new(1), 0), None);
        assert_eq!(manager.entry(ColumnId::new(0), 0), Some(&Rendered::line("a")));
    }
}
