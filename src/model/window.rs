//! Half-open interval arithmetic.
//!
//! A [`Window`] is `[start, end)` over one integer coordinate space: bytes,
//! file lines, or screen rows. The type does not record which space it is in;
//! [`Window::scale`] is the only operation that converts between spaces
//! (line count to byte count), and callers track the unit themselves.

use super::error::WindowError;

/// Half-open interval `[start, end)` with `start <= end`.
///
/// Immutable value type. Every operation returns a new window and never
/// produces `start > end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Window {
    start: i64,
    end: i64,
}

impl Window {
    /// Checked constructor.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::InvalidRange`] if `start > end`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hexview::model::Window;
    /// let w = Window::new(2, 5).unwrap();
    /// assert_eq!(w.len(), 3);
    /// assert!(Window::new(5, 2).is_err());
    /// ```
    pub fn new(start: i64, end: i64) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window starting at `start` spanning `len` units.
    ///
    /// # Panics
    ///
    /// Panics if `len` is negative.
    pub fn sized(start: i64, len: i64) -> Self {
        assert!(len >= 0, "window length must be non-negative (got {len})");
        Self {
            start,
            end: start + len,
        }
    }

    /// Unchecked constructor for arithmetic that preserves the invariant.
    fn span(start: i64, end: i64) -> Self {
        debug_assert!(start <= end, "window ends before it starts: {start}:{end}");
        Self { start, end }
    }

    /// Inclusive lower bound.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Exclusive upper bound.
    pub fn end(&self) -> i64 {
        self.end
    }

    /// Number of units covered.
    pub fn len(&self) -> i64 {
        self.end - self.start
    }

    /// True when the window covers nothing.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Window) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// True when the single coordinate `point` lies inside `self`.
    pub fn contains_point(&self, point: i64) -> bool {
        point >= self.start && point < self.end
    }

    /// Clamp `other` into `self`.
    ///
    /// Each endpoint is clamped independently, so a window that already fits
    /// comes back unchanged and a window larger than `self` shrinks to `self`.
    /// A window lying entirely outside collapses to the nearest edge.
    ///
    /// ```
    /// # use hexview::model::Window;
    /// let bounds = Window::new(0, 13).unwrap();
    /// let wanted = Window::new(-10, 20).unwrap();
    /// assert_eq!(bounds.compress(wanted), bounds);
    /// ```
    pub fn compress(&self, other: Window) -> Window {
        let start = other.start.clamp(self.start, self.end);
        let end = other.end.clamp(self.start, self.end);
        Window::span(start, end)
    }

    /// Translate `other` by the smallest amount that puts it inside `self`,
    /// then [`compress`](Self::compress) whatever still sticks out.
    ///
    /// Width is preserved whenever `other` is no wider than `self`.
    ///
    /// ```
    /// # use hexview::model::Window;
    /// let bounds = Window::new(0, 13).unwrap();
    /// let view = Window::new(8, 18).unwrap();
    /// assert_eq!(bounds.shift_into(view), Window::new(3, 13).unwrap());
    /// ```
    pub fn shift_into(&self, other: Window) -> Window {
        let shifted = if other.start < self.start {
            other.translate(self.start - other.start)
        } else if other.end > self.end {
            other.translate(self.end - other.end)
        } else {
            other
        };
        self.compress(shifted)
    }

    /// Move both endpoints by `offset`.
    pub fn translate(&self, offset: i64) -> Window {
        Window::span(self.start + offset, self.end + offset)
    }

    /// Multiply both endpoints by `factor` (line space to byte space).
    ///
    /// # Panics
    ///
    /// Panics if `factor` is negative.
    pub fn scale(&self, factor: i64) -> Window {
        assert!(factor >= 0, "window scale factor must be non-negative (got {factor})");
        Window::span(self.start * factor, self.end * factor)
    }

    /// Map both endpoints through `f`.
    ///
    /// `f` must be monotonic non-decreasing; used to translate a screen-row
    /// window into the file lines it covers.
    pub fn map(&self, f: impl Fn(i64) -> i64) -> Window {
        Window::span(f(self.start), f(self.end))
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
