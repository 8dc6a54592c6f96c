//! Byte-to-text rendering graph.
//!
//! Chunks of file bytes enter at the source and fan out to per-column
//! transforms; each transform's rows are delivered to a column buffer.

pub mod columns;
pub mod node;
pub mod overlay;
pub mod transform;

pub use columns::{ColumnKind, DropTransform, HexBytes, LineNumber, Printable};
pub use node::{CachedNode, ColumnSink, Fork, MutableNode, Pipeline, PushContext, Stage, TransformNode};
pub use overlay::Overlay;
pub use transform::{invoke, FnTransform, Rendered, Transform};
