//! Byte sources backing a viewing session.

pub mod file;

pub use file::FileBuffer;
