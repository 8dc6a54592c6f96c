//! File window / view window bookkeeping.
//!
//! The file window is the range of file lines currently loaded into the
//! column buffers: the target line plus one viewport height of margin on
//! each side, clamped to the file. The view window is the range of pad rows
//! on screen, always inside `[0, screen_end)`. The cursor sits at
//! `cursor_offset` rows below the view window's start, on the first row of
//! the current line.
//!
//! Scrolling moves the cursor first, then the view window within the loaded
//! rows, and reloads the file window only when the next line is not loaded.

use super::buffers::BufferManager;
use super::surface::Surface;
use crate::model::{SessionError, Window};
use std::collections::BTreeSet;
use std::ops::Range;

/// Loads a file-line range into buffers and redraws the surface.
pub trait WindowLoader {
    /// Replace the loaded lines with `lines` and redraw.
    ///
    /// On error nothing observable may have changed.
    fn load_lines(&mut self, lines: Window) -> Result<(), SessionError>;

    /// Buffers of the currently loaded lines.
    fn buffers(&self) -> &BufferManager;

    /// Surface the buffers are drawn on.
    fn surface_mut(&mut self) -> &mut dyn Surface;
}

/// Tracks which lines are loaded and which rows are on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineWindowManager {
    file_window: Window,
    view_window: Window,
    cursor_offset: usize,
    height: usize,
    line_count: u64,
    reload_count: usize,
}

impl LineWindowManager {
    /// Manager over a file of `line_count` lines with a `height`-row viewport.
    pub fn new(line_count: u64, height: usize) -> Self {
        Self {
            file_window: Window::default(),
            view_window: Window::default(),
            cursor_offset: 0,
            height: height.max(1),
            line_count,
            reload_count: 0,
        }
    }

    /// Loaded file lines.
    pub fn file_window(&self) -> Window {
        self.file_window
    }

    /// Pad rows on screen.
    pub fn view_window(&self) -> Window {
        self.view_window
    }

    /// Cursor row relative to the view window's start.
    pub fn cursor_offset(&self) -> usize {
        self.cursor_offset
    }

    /// Viewport height in rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Prefetch distance on each side of a reload.
    pub fn margin(&self) -> usize {
        self.height
    }

    /// Lines in the file.
    pub fn line_count(&self) -> u64 {
        self.line_count
    }

    /// Last line holding data, `None` for an empty file.
    pub fn last_line(&self) -> Option<u64> {
        self.line_count.checked_sub(1)
    }

    /// Completed file-window reloads.
    pub fn reload_count(&self) -> usize {
        self.reload_count
    }

    /// File line under the cursor.
    pub fn current_line(&self, buffers: &BufferManager) -> Option<u64> {
        buffers.screen_to_line(self.view_window.start() as usize + self.cursor_offset)
    }

    /// File line at the top of the view window.
    pub fn top_line(&self, buffers: &BufferManager) -> Option<u64> {
        buffers.screen_to_line(self.view_window.start() as usize)
    }

    fn all_lines(&self) -> Window {
        Window::sized(0, self.line_count as i64)
    }

    /// Load `[target - margin, target + height + margin)` clamped to the file.
    ///
    /// The view window is left for the caller to recompute. On error the
    /// previous windows stay in place.
    pub fn move_file_window(
        &mut self,
        loader: &mut dyn WindowLoader,
        target: u64,
    ) -> Result<(), SessionError> {
        let margin = self.margin() as i64;
        let target = target as i64;
        let wanted = Window::sized(target - margin, self.height as i64 + 2 * margin);
        let lines = self.all_lines().compress(wanted);

        loader.load_lines(lines)?;
        self.file_window = lines;
        self.reload_count += 1;
        tracing::debug!(
            target,
            file_window = %lines,
            reloads = self.reload_count,
            "file window moved"
        );
        Ok(())
    }

    /// Move the cursor by `delta` lines, one line at a time.
    pub fn scroll_by(
        &mut self,
        loader: &mut dyn WindowLoader,
        delta: i64,
    ) -> Result<(), SessionError> {
        let forward = delta > 0;
        for _ in 0..delta.unsigned_abs() {
            if !self.step(loader, forward)? {
                break;
            }
        }
        self.apply(loader);
        Ok(())
    }

    /// Move one line; false at the edge of the file.
    fn step(&mut self, loader: &mut dyn WindowLoader, forward: bool) -> Result<bool, SessionError> {
        let (Some(last), Some(current)) = (self.last_line(), self.current_line(loader.buffers()))
        else {
            return Ok(false);
        };
        let target = match forward {
            true if current < last => current + 1,
            false if current > 0 => current - 1,
            _ => return Ok(false),
        };

        if loader.buffers().line_rows(target).is_none() {
            self.move_file_window(loader, target)?;
            // Keep the cursor at the same screen offset across the reload.
            let Some(rows) = loader.buffers().line_rows(target) else {
                return Ok(false);
            };
            let start = rows.start as i64 - self.cursor_offset as i64;
            self.view_window = self
                .screen_bounds(loader.buffers())
                .shift_into(Window::sized(start, self.height as i64));
        }

        let Some(rows) = loader.buffers().line_rows(target) else {
            return Ok(false);
        };
        self.reveal(loader.buffers(), rows);
        Ok(true)
    }

    /// Jump to `line`, clamped to the file.
    ///
    /// Reloads only if `[line, line + height)` is not already loaded.
    pub fn goto_line(
        &mut self,
        loader: &mut dyn WindowLoader,
        line: i64,
    ) -> Result<(), SessionError> {
        let Some(last) = self.last_line() else {
            return Ok(());
        };
        let line = line.clamp(0, last as i64) as u64;

        let span = self
            .all_lines()
            .compress(Window::sized(line as i64, self.height as i64));
        if !self.file_window.contains(&span) || loader.buffers().line_rows(line).is_none() {
            self.move_file_window(loader, line)?;
        }

        let Some(rows) = loader.buffers().line_rows(line) else {
            return Ok(());
        };
        let bounds = self.screen_bounds(loader.buffers());
        self.view_window = bounds.shift_into(Window::sized(rows.start as i64, self.height as i64));
        self.cursor_offset = rows.start - self.view_window.start() as usize;
        self.apply(loader);
        Ok(())
    }

    /// Change the viewport height, keeping the current line.
    pub fn set_height(
        &mut self,
        loader: &mut dyn WindowLoader,
        height: usize,
    ) -> Result<(), SessionError> {
        let current = self.current_line(loader.buffers());
        self.height = height.max(1);
        match current {
            Some(line) => self.goto_line(loader, line as i64),
            None => Ok(()),
        }
    }

    /// Push the view offset and the current line's highlight to the surface.
    pub fn apply(&self, loader: &mut dyn WindowLoader) {
        let rows = self
            .current_line(loader.buffers())
            .and_then(|line| loader.buffers().line_rows(line))
            .map(|rows| rows.collect::<BTreeSet<_>>())
            .unwrap_or_default();
        let cursor_row = self.view_window.start() as usize + self.cursor_offset;

        let surface = loader.surface_mut();
        surface.set_visible_offset(self.view_window.start() as usize);
        surface.highlight(rows, cursor_row);
    }

    fn screen_bounds(&self, buffers: &BufferManager) -> Window {
        Window::sized(0, buffers.screen_end() as i64)
    }

    /// Shift the view window the least amount that shows `rows`, then put
    /// the cursor on `rows.start`.
    fn reveal(&mut self, buffers: &BufferManager, rows: Range<usize>) {
        let height = self.height as i64;
        let (first, end) = (rows.start as i64, rows.end as i64);
        let mut start = self.view_window.start();
        if first < start {
            start = first;
        } else if end > start + height {
            start = (end - height).min(first);
        }
        self.view_window = self
            .screen_bounds(buffers)
            .shift_into(Window::sized(start, height));
        self.cursor_offset = rows.start - self.view_window.start() as usize;
    }
}
