//! Column transform contract.
//!
//! A transform turns the bytes of one line into one or more display rows.
//! Transforms come in two capabilities: plain (`bytes -> rows`) and
//! index-aware (`bytes, absolute offset -> rows`). The pipeline asks each
//! transform which one it has through [`Transform::wants_index`] and calls it
//! accordingly via [`invoke`].

use crate::model::ByteChunk;
use std::fmt;
use unicode_width::UnicodeWidthStr;

/// Display rows produced for one logical line.
///
/// Always holds at least one row; an empty input becomes a single empty row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered(Vec<String>);

impl Rendered {
    /// Single-row output.
    pub fn line(row: impl Into<String>) -> Self {
        Self(vec![row.into()])
    }

    /// Multi-row output.
    pub fn rows(rows: Vec<String>) -> Self {
        if rows.is_empty() {
            Self(vec![String::new()])
        } else {
            Self(rows)
        }
    }

    /// The rows, top to bottom.
    pub fn as_rows(&self) -> &[String] {
        &self.0
    }

    /// Number of screen rows this output occupies.
    pub fn row_count(&self) -> usize {
        self.0.len()
    }

    /// Widest row in terminal cells.
    pub fn max_width(&self) -> usize {
        self.0.iter().map(|row| row.width()).max().unwrap_or(0)
    }
}

impl From<&str> for Rendered {
    fn from(row: &str) -> Self {
        Self::line(row)
    }
}

impl From<String> for Rendered {
    fn from(row: String) -> Self {
        Self::line(row)
    }
}

impl From<Vec<String>> for Rendered {
    fn from(rows: Vec<String>) -> Self {
        Self::rows(rows)
    }
}

/// A column transform or decoder plugin.
///
/// Must be deterministic and free of side effects: identical input yields
/// identical output. Returning `None` is the "no output" sentinel and halts
/// propagation along the calling branch only.
pub trait Transform: fmt::Debug {
    /// Short name shown in the status line.
    fn name(&self) -> &str;

    /// True when the transform needs the absolute file offset of its input.
    fn wants_index(&self) -> bool {
        false
    }

    /// Render one line of bytes.
    fn render(&self, bytes: &[u8]) -> Option<Rendered>;

    /// Render one line of bytes starting at absolute file `offset`.
    ///
    /// Only called when [`wants_index`](Self::wants_index) is true.
    fn render_at(&self, bytes: &[u8], offset: u64) -> Option<Rendered> {
        let _ = offset;
        self.render(bytes)
    }
}

/// Call `transform` on `chunk` using whichever capability it declares.
pub fn invoke(transform: &dyn Transform, chunk: &ByteChunk) -> Option<Rendered> {
    if transform.wants_index() {
        transform.render_at(chunk.bytes(), chunk.offset())
    } else {
        transform.render(chunk.bytes())
    }
}

/// Transform built from a closure over the bytes.
pub struct FnTransform<F> {
    name: String,
    f: F,
}

impl<F> FnTransform<F>
where
    F: Fn(&[u8]) -> Option<Rendered>,
{
    /// Wrap `f` under `name`.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self { name: name.into(), f }
    }
}

impl<F> fmt::Debug for FnTransform<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransform").field("name", &self.name).finish()
    }
}

impl<F> Transform for FnTransform<F>
where
    F: Fn(&[u8]) -> Option<Rendered>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, bytes: &[u8]) -> Option<Rendered> {
        (self.f)(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Offsets;

    impl Transform for Offsets {
        fn name(&self) -> &str {
            "offsets"
        }

        fn wants_index(&self) -> bool {
            true
        }

        fn render(&self, _bytes: &[u8]) -> Option<Rendered> {
            Some(Rendered::line("??"))
        }

        fn render_at(&self, bytes: &[u8], offset: u64) -> Option<Rendered> {
            Some(Rendered::line(format!("{offset}+{}", bytes.len())))
        }
    }

    #[test]
    fn empty_rows_become_one_empty_row() {
        let rendered = Rendered::rows(Vec::new());
        assert_eq!(rendered.row_count(), 1);
        assert_eq!(rendered.as_rows(), &[String::new()]);
    }

    #[test]
    fn max_width_measures_widest_row() {
        let rendered = Rendered::rows(vec!["ab".into(), "abcd".into(), "a".into()]);
        assert_eq!(rendered.max_width(), 4);
    }

    #[test]
    fn invoke_passes_offset_to_index_aware_transforms() {
        let chunk = ByteChunk::new(24, vec![0u8; 8]);
        assert_eq!(invoke(&Offsets, &chunk), Some(Rendered::line("24+8")));
    }

    #[test]
    fn invoke_calls_plain_transforms_without_offset() {
        let len = FnTransform::new("len", |bytes: &[u8]| Some(Rendered::line(bytes.len().to_string())));
        let chunk = ByteChunk::new(24, vec![0u8; 3]);
        assert!(!len.wants_index());
        assert_eq!(invoke(&len, &chunk), Some(Rendered::line("3")));
    }

    #[test]
    fn fn_transform_reports_name() {
        let t = FnTransform::new("custom", |_: &[u8]| None);
        assert_eq!(t.name(), "custom");
        assert!(format!("{t:?}").contains("custom"));
    }
}
