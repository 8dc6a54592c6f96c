//! Raw byte chunks flowing into the pipeline.

/// Immutable run of raw bytes tagged with its absolute file offset.
///
/// Produced by `FileBuffer::stream`, at most `chunk_width` bytes long, and
/// handed by shared reference to every pipeline branch so no branch can
/// mutate what the others see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteChunk {
    offset: u64,
    bytes: Box<[u8]>,
}

impl ByteChunk {
    /// Create a chunk starting at absolute byte `offset`.
    pub fn new(offset: u64, bytes: impl Into<Box<[u8]>>) -> Self {
        Self {
            offset,
            bytes: bytes.into(),
        }
    }

    /// Absolute offset of the first byte.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// The bytes themselves.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes carried.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for a zero-length chunk.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_exposes_offset_and_bytes() {
        let chunk = ByteChunk::new(16, vec![1u8, 2, 3]);
        assert_eq!(chunk.offset(), 16);
        assert_eq!(chunk.bytes(), &[1, 2, 3]);
        assert_eq!(chunk.len(), 3);
        assert!(!chunk.is_empty());
    }
}
