//! Owner of the file, the pipeline, the column buffers and the pad.
//!
//! Every method that changes buffers works on a copy and swaps it in only
//! after streaming, width computation and drawing have all succeeded, so a
//! failed read leaves the loaded lines and the pad exactly as they were.

use crate::config::ViewerConfig;
use crate::model::{SessionError, Window};
use crate::pipeline::{CachedNode, Fork, MutableNode, Pipeline, Transform, TransformNode};
use crate::source::FileBuffer;
use crate::view_state::{
    BufferManager, ColumnId, ColumnSpec, PadSurface, Surface, WindowLoader,
};
use std::fs::File;
use std::io::{Read, Seek};

/// File plus everything derived from it for display.
#[derive(Debug)]
pub struct Engine<R = File> {
    file: FileBuffer<R>,
    pipeline: Pipeline,
    buffers: BufferManager,
    surface: PadSurface,
    bytes_per_line: usize,
}

impl<R: Read + Seek> Engine<R> {
    /// Wire the static columns of `config` plus a decoder column running
    /// `decoder`.
    pub fn new(file: FileBuffer<R>, config: &ViewerConfig, decoder: Box<dyn Transform>) -> Self {
        let bytes_per_line = config.bytes_per_line;
        let bpl = bytes_per_line as u64;

        let mut specs: Vec<ColumnSpec> = config
            .columns
            .iter()
            .map(|column| ColumnSpec::required(column.gap))
            .collect();
        specs.push(ColumnSpec::optional(config.decoder_gap));

        let mut source = Fork::new();
        for (idx, column) in config.columns.iter().enumerate() {
            source.add_output(Box::new(
                TransformNode::new(column.kind.transform(), bpl).with_output(ColumnId::new(idx)),
            ));
        }
        let decoder_column = ColumnId::new(config.columns.len());
        let decoder = CachedNode::new(MutableNode::new(decoder, decoder_column, bpl));

        Self {
            file,
            pipeline: Pipeline::new(source, decoder),
            buffers: BufferManager::new(&specs),
            surface: PadSurface::new(config.surface_capacity, config.viewport_height),
            bytes_per_line,
        }
    }

    /// Total bytes in the file.
    pub fn file_len(&mut self) -> Result<u64, SessionError> {
        Ok(self.file.len()?)
    }

    /// Display name of the file.
    pub fn name(&self) -> &str {
        self.file.name()
    }

    /// Bytes per file line.
    pub fn bytes_per_line(&self) -> usize {
        self.bytes_per_line
    }

    /// The rendering graph.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// The rendering graph, for swapping the decoder or editing the overlay.
    pub fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }

    /// The pad.
    pub fn surface(&self) -> &PadSurface {
        &self.surface
    }

    /// Change the pad's visible height.
    pub fn set_height(&mut self, height: usize) {
        self.surface.set_height(height);
    }

    /// Re-render `lines` through the decoder only.
    ///
    /// Their decoder entries are dropped first so a transform that declines
    /// to render leaves them empty.
    pub fn redecode(&mut self, lines: Window) -> Result<(), SessionError> {
        let lines = self.buffers.loaded().compress(lines);
        let column = self.pipeline.decoder_column();

        let mut fresh = self.buffers.clone();
        if lines == self.buffers.loaded() {
            fresh.clear_column(column);
        } else {
            for line in lines.start()..lines.end() {
                fresh.clear_entry(column, line as u64);
            }
        }

        let bytes = lines.scale(self.bytes_per_line as i64);
        let pipeline = &self.pipeline;
        let chunks = self
            .file
            .stream(bytes, self.bytes_per_line, |chunk| pipeline.push_decoder(chunk, &mut fresh))?;
        tracing::debug!(lines = %lines, chunks, decoder = pipeline.decoder().name(), "redecoded");

        self.commit(fresh)
    }

    /// Draw the loaded buffers onto a blank pad.
    pub fn redraw(&mut self) -> Result<(), SessionError> {
        let fresh = self.buffers.clone();
        self.commit(fresh)
    }

    fn commit(&mut self, mut fresh: BufferManager) -> Result<(), SessionError> {
        fresh.compute_widths()?;
        let mut surface = self.surface.blank_like();
        fresh.draw(&mut surface)?;
        self.buffers = fresh;
        self.surface = surface;
        Ok(())
    }
}

impl<R: Read + Seek> WindowLoader for Engine<R> {
    fn load_lines(&mut self, lines: Window) -> Result<(), SessionError> {
        let mut fresh = BufferManager::new(&self.specs());
        fresh.begin(lines);

        let bytes = lines.scale(self.bytes_per_line as i64);
        let pipeline = &self.pipeline;
        let chunks = self
            .file
            .stream(bytes, self.bytes_per_line, |chunk| pipeline.push(chunk, &mut fresh))?;

        self.commit(fresh)?;
        tracing::debug!(
            file_window = %lines,
            byte_window = %bytes,
            chunks,
            screen_end = self.buffers.screen_end(),
            "reloaded file window"
        );
        Ok(())
    }

    fn buffers(&self) -> &BufferManager {
        &self.buffers
    }

    fn surface_mut(&mut self) -> &mut dyn Surface {
        &mut self.surface
    }
}

impl<R> Engine<R> {
    fn specs(&self) -> Vec<ColumnSpec> {
        self.buffers.columns().iter().map(|c| c.spec()).collect()
    }
}
