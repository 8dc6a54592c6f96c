//! The viewing session: one open file and the operations the shell drives.

use super::address::parse_address;
use super::engine::Engine;
use crate::config::ViewerConfig;
use crate::model::{SessionError, Window};
use crate::pipeline::Rendered;
use crate::plugins::{PluginEntry, PluginRegistry};
use crate::source::FileBuffer;
use crate::view_state::{BufferManager, LineWindowManager, PadSurface, WindowLoader};
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::{debug, info, warn};

/// A file opened for viewing.
///
/// Owns the file, the rendering graph, the loaded buffers and the pad
/// exclusively. Every operation runs to completion before returning; an
/// operation that fails leaves the previous view in place.
#[derive(Debug)]
pub struct HexSession<R = File> {
    engine: Engine<R>,
    window: LineWindowManager,
    plugins: PluginRegistry,
    active_plugin: i64,
}

impl HexSession<File> {
    /// Open the file at `path` and show its first line.
    ///
    /// # Errors
    ///
    /// Invalid settings, a missing or unreadable file, or an unknown
    /// `default_plugin`.
    pub fn open(path: impl AsRef<Path>, config: &ViewerConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let file = FileBuffer::open(path)?;
        Self::start(file, config)
    }
}

impl<R: Read + Seek> HexSession<R> {
    /// Session over any seekable byte source, shown as `name`.
    ///
    /// # Errors
    ///
    /// Same as [`HexSession::open`], minus the file lookup.
    pub fn from_reader(
        name: impl Into<String>,
        reader: R,
        config: &ViewerConfig,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        Self::start(FileBuffer::from_reader(name, reader), config)
    }

    fn start(mut file: FileBuffer<R>, config: &ViewerConfig) -> Result<Self, SessionError> {
        let plugins = PluginRegistry::builtin();
        let decoder = plugins.select(config.default_plugin)?;

        let len = file.len()?;
        let line_count = len.div_ceil(config.bytes_per_line as u64);
        info!(file = %file.name(), len, lines = line_count, "opened file");

        let mut session = Self {
            engine: Engine::new(file, config, decoder),
            window: LineWindowManager::new(line_count, config.viewport_height),
            plugins,
            active_plugin: config.default_plugin,
        };
        session.goto_line(0)?;
        Ok(session)
    }

    /// Move the cursor by `delta` lines.
    pub fn scroll(&mut self, delta: i64) -> Result<(), SessionError> {
        self.window.scroll_by(&mut self.engine, delta)
    }

    /// Jump to `line`, clamped to the file.
    pub fn goto_line(&mut self, line: i64) -> Result<(), SessionError> {
        self.window.goto_line(&mut self.engine, line)
    }

    /// Jump to a typed address, decimal or hex.
    ///
    /// Text that does not parse is ignored.
    pub fn goto(&mut self, text: &str) -> Result<(), SessionError> {
        match parse_address(text) {
            Ok(line) => self.goto_line(line),
            Err(err) => {
                debug!(input = text, error = %err, "ignoring goto");
                Ok(())
            }
        }
    }

    /// Make `entry` selectable; returns its selector.
    pub fn register_plugin(&mut self, entry: PluginEntry) -> i64 {
        self.plugins.register(entry);
        self.plugins.len() as i64
    }

    /// Put the decoder answering to `selector` into the decoder column.
    ///
    /// Re-renders only the decoder column of the loaded lines, then returns
    /// to the line that was current. Previews belong to the old decoder and
    /// are discarded.
    ///
    /// # Errors
    ///
    /// [`PluginError::UnknownPlugin`](crate::model::PluginError) leaves the
    /// session untouched; a read failure leaves the old output on screen.
    pub fn activate_plugin(&mut self, selector: i64) -> Result<(), SessionError> {
        let decoder = self.plugins.select(selector)?;
        let current = self.current_line();

        let previous = self.engine.pipeline_mut().swap_decoder(decoder);
        let loaded = self.engine.buffers().loaded();
        if let Err(err) = self.engine.redecode(loaded) {
            warn!(selector, error = %err, "decoder swap failed, restoring previous decoder");
            self.engine.pipeline_mut().swap_decoder(previous);
            return Err(err);
        }

        self.active_plugin = selector;
        info!(
            selector,
            decoder = self.decoder_name(),
            lines = %loaded,
            "activated decoder"
        );

        match current {
            Some(line) => self.goto_line(line as i64),
            None => Ok(()),
        }
    }

    /// Pin the decoder output of the current line.
    ///
    /// The pinned value is shown for that line instead of running the
    /// decoder again, across reloads, until it is unset or the decoder
    /// changes. Without decoder output at the cursor this does nothing.
    pub fn set_preview(&mut self) -> Result<(), SessionError> {
        let Some(line) = self.current_line() else {
            return Ok(());
        };
        let column = self.engine.pipeline().decoder_column();
        let Some(value) = self.engine.buffers().entry(column, line).cloned() else {
            debug!(line, "no decoder output to preview");
            return Ok(());
        };

        self.engine.pipeline_mut().overlay_mut().insert(line, value);
        debug!(line, previews = self.preview_lines().len(), "preview set");
        self.redecode_line(line)
    }

    /// Drop the pinned decoder output of the current line, if any.
    pub fn unset_preview(&mut self) -> Result<(), SessionError> {
        let Some(line) = self.current_line() else {
            return Ok(());
        };
        if self.engine.pipeline_mut().overlay_mut().remove(line).is_none() {
            return Ok(());
        }
        debug!(line, previews = self.preview_lines().len(), "preview unset");
        self.redecode_line(line)
    }

    fn redecode_line(&mut self, line: u64) -> Result<(), SessionError> {
        self.engine.redecode(Window::sized(line as i64, 1))?;
        self.window.apply(&mut self.engine);
        Ok(())
    }

    /// Redraw the pad from the loaded buffers.
    pub fn refresh(&mut self) -> Result<(), SessionError> {
        self.engine.redraw()?;
        self.window.apply(&mut self.engine);
        Ok(())
    }

    /// Change the number of visible rows, keeping the current line.
    pub fn resize(&mut self, height: usize) -> Result<(), SessionError> {
        self.engine.set_height(height.max(1));
        self.window.set_height(&mut self.engine, height)
    }
}

impl<R: Read + Seek> HexSession<R> {
    /// File line under the cursor, `None` for an empty file.
    pub fn current_line(&self) -> Option<u64> {
        self.window.current_line(self.engine.buffers())
    }

    /// File line at the top of the screen.
    pub fn top_line(&self) -> Option<u64> {
        self.window.top_line(self.engine.buffers())
    }

    /// Loaded file lines.
    pub fn file_window(&self) -> Window {
        self.window.file_window()
    }

    /// Pad rows on screen.
    pub fn view_window(&self) -> Window {
        self.window.view_window()
    }

    /// Cursor row below the top of the screen.
    pub fn cursor_offset(&self) -> usize {
        self.window.cursor_offset()
    }

    /// Last file line, `None` for an empty file.
    pub fn last_line(&self) -> Option<u64> {
        self.window.last_line()
    }

    /// Lines in the file.
    pub fn line_count(&self) -> u64 {
        self.window.line_count()
    }

    /// Visible rows.
    pub fn height(&self) -> usize {
        self.window.height()
    }

    /// File-window reloads so far, the initial load included.
    pub fn reload_count(&self) -> usize {
        self.window.reload_count()
    }

    /// Selector of the decoder in use.
    pub fn active_plugin(&self) -> i64 {
        self.active_plugin
    }

    /// Name of the decoder in use.
    pub fn decoder_name(&self) -> &str {
        self.engine.pipeline().decoder().name()
    }

    /// Registered decoder plugins.
    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    /// The pad.
    pub fn surface(&self) -> &PadSurface {
        self.engine.surface()
    }

    /// What the decoder column shows for `line`, if it is loaded.
    pub fn decoder_output(&self, line: u64) -> Option<&Rendered> {
        let column = self.engine.pipeline().decoder_column();
        self.engine.buffers().entry(column, line)
    }

    /// Lines with pinned decoder output, ascending.
    pub fn preview_lines(&self) -> Vec<u64> {
        self.engine.pipeline().overlay().lines().collect()
    }

    /// Buffers of the loaded lines.
    pub fn buffers(&self) -> &BufferManager {
        self.engine.buffers()
    }

    /// Display name of the file.
    pub fn name(&self) -> &str {
        self.engine.name()
    }

    /// Bytes per file line.
    pub fn bytes_per_line(&self) -> usize {
        self.engine.bytes_per_line()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
