//! Random-access, read-only view over the backing file.
//!
//! Provides [`FileBuffer`] for pushing arbitrary byte ranges into the
//! pipeline in fixed-size chunks without reading the whole file.

use crate::model::error::InputError;
use crate::model::{ByteChunk, Window};
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::debug;

/// Read-only view over a seekable byte source.
///
/// Owns the underlying reader exclusively for the session's lifetime.
/// Length is computed lazily on first request and cached.
#[derive(Debug)]
pub struct FileBuffer<R = File> {
    name: String,
    reader: R,
    len: Option<u64>,
}

impl FileBuffer<File> {
    /// Open the file at `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    /// Returns `InputError::Io` for other I/O errors.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => InputError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => InputError::Io(e),
        })?;

        Ok(Self::from_reader(path.display().to_string(), file))
    }
}

impl<R: Read + Seek> FileBuffer<R> {
    /// Wrap any seekable reader. `name` is used for display and logging.
    pub fn from_reader(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
            len: None,
        }
    }

    /// Display name of the source.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total byte length. Computed once, then cached.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` if seeking fails.
    pub fn len(&mut self) -> Result<u64, InputError> {
        if let Some(len) = self.len {
            return Ok(len);
        }
        let len = self.reader.seek(SeekFrom::End(0))?;
        debug!(name = %self.name, len, "Computed file length");
        self.len = Some(len);
        Ok(len)
    }

    /// True when the source holds no bytes.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` if seeking fails.
    pub fn is_empty(&mut self) -> Result<bool, InputError> {
        Ok(self.len()? == 0)
    }

    /// Push the byte range `bytes` into `push` in `chunk_width`-sized chunks.
    ///
    /// Chunks arrive in strictly increasing offset order, each tagged with its
    /// absolute starting offset. The range is clamped to the file; the last
    /// chunk may be short. Returns the number of chunks pushed.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` if seeking or reading fails. Reaching
    /// end-of-file early is not an error.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_width` is zero.
    pub fn stream<F>(&mut self, bytes: Window, chunk_width: usize, mut push: F) -> Result<usize, InputError>
    where
        F: FnMut(&ByteChunk),
    {
        assert!(chunk_width > 0, "chunk width must be positive");

        let len = self.len()?;
        let start = u64::try_from(bytes.start().max(0)).unwrap_or(0).min(len);
        let end = u64::try_from(bytes.end().max(0)).unwrap_or(0).min(len);

        self.reader.seek(SeekFrom::Start(start))?;

        let mut position = start;
        let mut pushed = 0;
        let mut buffer = vec![0u8; chunk_width];

        while position < end {
            let wanted = usize::try_from(end - position).map_or(chunk_width, |rest| rest.min(chunk_width));
            let filled = read_up_to(&mut self.reader, &mut buffer[..wanted])?;
            if filled == 0 {
                break;
            }

            push(&ByteChunk::new(position, &buffer[..filled]));
            pushed += 1;
            position += filled as u64;

            if filled < wanted {
                break;
            }
        }

        Ok(pushed)
    }
}

/// Fill `buf` as far as the reader allows, retrying short reads.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
