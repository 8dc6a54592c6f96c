//! Push-based fan-out graph.
//!
//! The source [`Fork`] receives fixed-size byte chunks and hands the same
//! chunk, by shared reference, to every branch. Branches render the chunk
//! and deliver rows to column buffers addressed by [`ColumnId`] handles; the
//! buffers themselves live in the `BufferManager`, never in the graph.
//!
//! Node kinds:
//! - [`Fork`]: forwards its input unchanged to every downstream stage.
//! - [`TransformNode`]: renders with a fixed transform and fans the rows out to
//!   one or more columns.
//! - [`MutableNode`]: one downstream column, transform swappable at runtime.
//! - [`CachedNode`]: consults the [`Overlay`] per file line before invoking
//!   the wrapped node's transform.

use super::overlay::Overlay;
use super::transform::{invoke, Rendered, Transform};
use crate::model::ByteChunk;
use crate::view_state::buffers::ColumnId;
use std::fmt;

/// Receiver of rendered rows, addressed by column handle and file line.
pub trait ColumnSink {
    /// Store `rows` as the entry of `column` for absolute file `line`.
    fn accept(&mut self, column: ColumnId, line: u64, rows: Rendered);
}

/// Borrowed state every push needs.
pub struct PushContext<'a> {
    sink: &'a mut dyn ColumnSink,
    overlay: &'a Overlay,
}

impl<'a> PushContext<'a> {
    /// Bundle a sink with the overlay to consult.
    pub fn new(sink: &'a mut dyn ColumnSink, overlay: &'a Overlay) -> Self {
        Self { sink, overlay }
    }
}

impl fmt::Debug for PushContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushContext")
            .field("overlay_len", &self.overlay.len())
            .finish_non_exhaustive()
    }
}

/// A node in the push graph.
pub trait Stage: fmt::Debug {
    /// Process `chunk` and push results downstream.
    fn push(&self, chunk: &ByteChunk, ctx: &mut PushContext<'_>);
}

/// Identity fan-out: every downstream stage sees the same chunk.
#[derive(Debug, Default)]
pub struct Fork {
    downstream: Vec<Box<dyn Stage>>,
}

impl Fork {
    /// Fork with no branches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register another branch.
    pub fn add_output(&mut self, stage: Box<dyn Stage>) {
        self.downstream.push(stage);
    }

    /// Number of registered branches.
    pub fn len(&self) -> usize {
        self.downstream.len()
    }

    /// True when no branch is registered.
    pub fn is_empty(&self) -> bool {
        self.downstream.is_empty()
    }
}

impl Stage for Fork {
    fn push(&self, chunk: &ByteChunk, ctx: &mut PushContext<'_>) {
        for stage in &self.downstream {
            stage.push(chunk, ctx);
        }
    }
}

fn line_of(chunk: &ByteChunk, bytes_per_line: u64) -> u64 {
    chunk.offset() / bytes_per_line
}

/// Fixed transform fanning its output to every registered column.
#[derive(Debug)]
pub struct TransformNode {
    transform: Box<dyn Transform>,
    sinks: Vec<ColumnId>,
    bytes_per_line: u64,
}

impl TransformNode {
    /// Node rendering with `transform` into no columns yet.
    pub fn new(transform: Box<dyn Transform>, bytes_per_line: u64) -> Self {
        Self {
            transform,
            sinks: Vec::new(),
            bytes_per_line,
        }
    }

    /// Register another destination column.
    #[must_use]
    pub fn with_output(mut self, column: ColumnId) -> Self {
        self.sinks.push(column);
        self
    }
}

impl Stage for TransformNode {
    fn push(&self, chunk: &ByteChunk, ctx: &mut PushContext<'_>) {
        let Some(rows) = invoke(self.transform.as_ref(), chunk) else {
            return;
        };
        let line = line_of(chunk, self.bytes_per_line);
        for &column in &self.sinks {
            ctx.sink.accept(column, line, rows.clone());
        }
    }
}

/// Single-output node whose transform can be replaced without rebuilding
/// the graph.
#[derive(Debug)]
pub struct MutableNode {
    transform: Box<dyn Transform>,
    sink: ColumnId,
    bytes_per_line: u64,
}

impl MutableNode {
    /// Node rendering with `transform` into `sink`.
    pub fn new(transform: Box<dyn Transform>, sink: ColumnId, bytes_per_line: u64) -> Self {
        Self {
            transform,
            sink,
            bytes_per_line,
        }
    }

    /// Replace the transform, returning the previous one.
    pub fn swap(&mut self, transform: Box<dyn Transform>) -> Box<dyn Transform> {
        std::mem::replace(&mut self.transform, transform)
    }

    /// Current transform.
    pub fn transform(&self) -> &dyn Transform {
        self.transform.as_ref()
    }

    /// Destination column.
    pub fn sink(&self) -> ColumnId {
        self.sink
    }
}

impl Stage for MutableNode {
    fn push(&self, chunk: &ByteChunk, ctx: &mut PushContext<'_>) {
        if let Some(rows) = invoke(self.transform.as_ref(), chunk) {
            ctx.sink.accept(self.sink, line_of(chunk, self.bytes_per_line), rows);
        }
    }
}

/// Overlay-aware wrapper: a cached line short-circuits the transform.
#[derive(Debug)]
pub struct CachedNode {
    inner: MutableNode,
}

impl CachedNode {
    /// Wrap `inner`.
    pub fn new(inner: MutableNode) -> Self {
        Self { inner }
    }

    /// The wrapped node.
    pub fn inner(&self) -> &MutableNode {
        &self.inner
    }

    /// The wrapped node, for swapping its transform.
    pub fn inner_mut(&mut self) -> &mut MutableNode {
        &mut self.inner
    }
}

impl Stage for CachedNode {
    fn push(&self, chunk: &ByteChunk, ctx: &mut PushContext<'_>) {
        let line = line_of(chunk, self.inner.bytes_per_line);
        match ctx.overlay.get(line) {
            Some(cached) => {
                let rows = cached.clone();
                ctx.sink.accept(self.inner.sink, line, rows);
            }
            None => self.inner.push(chunk, ctx),
        }
    }
}

/// The complete graph: static column branches plus the decoder branch.
///
/// The source fans each chunk to every static branch and then to the
/// decoder branch. The decoder branch is held apart so its transform can be
/// swapped and so it can be re-streamed alone.
#[derive(Debug)]
pub struct Pipeline {
    source: Fork,
    decoder: CachedNode,
    overlay: Overlay,
}

impl Pipeline {
    /// Build from static branches and the decoder node.
    pub fn new(source: Fork, decoder: CachedNode) -> Self {
        Self {
            source,
            decoder,
            overlay: Overlay::new(),
        }
    }

    /// Push `chunk` through every branch.
    pub fn push(&self, chunk: &ByteChunk, sink: &mut dyn ColumnSink) {
        let mut ctx = PushContext::new(sink, &self.overlay);
        self.source.push(chunk, &mut ctx);
        self.decoder.push(chunk, &mut ctx);
    }

    /// Push `chunk` through the decoder branch only.
    pub fn push_decoder(&self, chunk: &ByteChunk, sink: &mut dyn ColumnSink) {
        let mut ctx = PushContext::new(sink, &self.overlay);
        self.decoder.push(chunk, &mut ctx);
    }

    /// Swap the decoder transform. Cached lines belong to the old decoder and
    /// are dropped.
    pub fn swap_decoder(&mut self, transform: Box<dyn Transform>) -> Box<dyn Transform> {
        self.overlay.clear();
        self.decoder.inner_mut().swap(transform)
    }

    /// Active decoder transform.
    pub fn decoder(&self) -> &dyn Transform {
        self.decoder.inner().transform()
    }

    /// Column fed by the decoder branch.
    pub fn decoder_column(&self) -> ColumnId {
        self.decoder.inner().sink()
    }

    /// The cache overlay.
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// The cache overlay, for adding or removing entries.
    pub fn overlay_mut(&mut self) -> &mut Overlay {
        &mut self.overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::columns::{DropTransform, HexBytes, Printable};
    use crate::pipeline::transform::FnTransform;
    use std::collections::BTreeMap;

    #[derive(Debug, Default)]
    struct Recorder {
        entries: BTreeMap<(usize, u64), Rendered>,
    }

    impl ColumnSink for Recorder {
        fn accept(&mut self, column: ColumnId, line: u64, rows: Rendered) {
            self.entries.insert((column.get(), line), rows);
        }
    }

    impl Recorder {
        fn row(&self, column: usize, line: u64) -> Option<&str> {
            self.entries
                .get(&(column, line))
                .map(|r| r.as_rows()[0].as_str())
        }
    }

    fn pipeline_with(decoder: Box<dyn Transform>) -> Pipeline {
        let mut source = Fork::new();
        source.add_output(Box::new(
            TransformNode::new(Box::new(HexBytes), 4).with_output(ColumnId::new(0)),
        ));
        let decoder = CachedNode::new(MutableNode::new(decoder, ColumnId::new(1), 4));
        Pipeline::new(source, decoder)
    }

    #[test]
    fn fork_feeds_every_branch_the_same_chunk() {
        let mut source = Fork::new();
        source.add_output(Box::new(
            TransformNode::new(Box::new(HexBytes), 4).with_output(ColumnId::new(0)),
        ));
        source.add_output(Box::new(
            TransformNode::new(Box::new(Printable), 4).with_output(ColumnId::new(1)),
        ));
        assert_eq!(source.len(), 2);

        let overlay = Overlay::new();
        let mut recorder = Recorder::default();
        let mut ctx = PushContext::new(&mut recorder, &overlay);
        source.push(&ByteChunk::new(8, b"AB".to_vec()), &mut ctx);

        assert_eq!(recorder.row(0, 2), Some("41 42"));
        assert_eq!(recorder.row(1, 2), Some("A  B  "));
    }

    #[test]
    fn transform_node_fans_rows_to_every_sink() {
        let node = TransformNode::new(Box::new(HexBytes), 4)
            .with_output(ColumnId::new(0))
            .with_output(ColumnId::new(3));

        let overlay = Overlay::new();
        let mut recorder = Recorder::default();
        let mut ctx = PushContext::new(&mut recorder, &overlay);
        node.push(&ByteChunk::new(0, vec![0xAA]), &mut ctx);

        assert_eq!(recorder.row(0, 0), Some("AA"));
        assert_eq!(recorder.row(3, 0), Some("AA"));
    }

    #[test]
    fn no_output_sentinel_halts_only_its_branch() {
        let pipeline = pipeline_with(Box::new(DropTransform));
        let mut recorder = Recorder::default();
        pipeline.push(&ByteChunk::new(0, vec![1, 2]), &mut recorder);

        assert_eq!(recorder.row(0, 0), Some("01 02"));
        assert_eq!(recorder.row(1, 0), None);
    }

    #[test]
    fn mutable_node_swaps_without_rebuilding() {
        let mut pipeline = pipeline_with(Box::new(DropTransform));
        assert_eq!(pipeline.decoder().name(), "none");

        let old = pipeline.swap_decoder(Box::new(Printable));
        assert_eq!(old.name(), "none");
        assert_eq!(pipeline.decoder().name(), "printable");

        let mut recorder = Recorder::default();
        pipeline.push(&ByteChunk::new(4, b"ok".to_vec()), &mut recorder);
        assert_eq!(recorder.row(1, 1), Some("o  k  "));
    }

    #[test]
    fn cached_node_prefers_overlay_entry() {
        let mut pipeline = pipeline_with(Box::new(Printable));
        pipeline.overlay_mut().insert(1, Rendered::line("pinned"));

        let mut recorder = Recorder::default();
        pipeline.push(&ByteChunk::new(0, b"aa".to_vec()), &mut recorder);
        pipeline.push(&ByteChunk::new(4, b"bb".to_vec()), &mut recorder);

        assert_eq!(recorder.row(1, 0), Some("a  a  "));
        assert_eq!(recorder.row(1, 1), Some("pinned"));
    }

    #[test]
    fn cached_node_skips_transform_on_hit() {
        let calls = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = std::rc::Rc::clone(&calls);
        let counting = FnTransform::new("count", move |bytes: &[u8]| {
            counter.set(counter.get() + 1);
            Some(Rendered::line(bytes.len().to_string()))
        });
        let node = CachedNode::new(MutableNode::new(Box::new(counting), ColumnId::new(0), 4));

        let mut overlay = Overlay::new();
        overlay.insert(0, Rendered::line("cached"));
        let mut recorder = Recorder::default();
        let mut ctx = PushContext::new(&mut recorder, &overlay);
        node.push(&ByteChunk::new(0, vec![0; 4]), &mut ctx);
        node.push(&ByteChunk::new(4, vec![0; 4]), &mut ctx);

        assert_eq!(calls.get(), 1);
        assert_eq!(recorder.row(0, 0), Some("cached"));
        assert_eq!(recorder.row(0, 1), Some("4"));
    }

    #[test]
    fn swapping_decoder_clears_overlay() {
        let mut pipeline = pipeline_with(Box::new(Printable));
        pipeline.overlay_mut().insert(3, Rendered::line("x"));
        pipeline.swap_decoder(Box::new(HexBytes));
        assert!(pipeline.overlay().is_empty());
    }

    #[test]
    fn push_decoder_leaves_static_columns_alone() {
        let pipeline = pipeline_with(Box::new(Printable));
        let mut recorder = Recorder::default();
        pipeline.push_decoder(&ByteChunk::new(0, b"z".to_vec()), &mut recorder);
        assert_eq!(recorder.row(0, 0), None);
        assert_eq!(recorder.row(1, 0), Some("z  "));
    }
}
