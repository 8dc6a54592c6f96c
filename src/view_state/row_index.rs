//! RowIndex - screen row bookkeeping for loaded lines via Fenwick tree
//!
//! Maps each loaded line to the first screen row it occupies on the pad and
//! maps screen rows back to lines.
//!
//! # Complexity
//!
//! - `push`: O(log n) amortized
//! - `start_of`: O(log n)
//! - `line_at`: O(log² n)
//! - `total`: O(log n)
//! - `clear`: O(capacity)

/// Cumulative row heights of the loaded lines, in load order.
///
/// Line positions are relative to the first loaded line; the caller
/// translates to absolute file lines.
#[derive(Debug, Clone)]
pub struct RowIndex {
    /// Fenwick tree backing storage (1-indexed internally, 0-indexed API)
    tree: Vec<isize>,
    /// Row height of each pushed line
    heights: Vec<usize>,
}

impl RowIndex {
    /// Creates an empty index with room for `capacity` lines.
    ///
    /// ```
    /// # use hexview::view_state::row_index::RowIndex;
    /// let index = RowIndex::new(16);
    /// assert_eq!(index.len(), 0);
    /// assert_eq!(index.total(), 0);
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self {
            tree: vec![0; capacity],
            heights: Vec::with_capacity(capacity),
        }
    }

    /// Number of lines indexed.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// True when no line is indexed.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Appends a line occupying `rows` screen rows.
    ///
    /// ```
    /// # use hexview::view_state::row_index::RowIndex;
    /// let mut index = RowIndex::new(1);
    /// index.push(1);
    /// index.push(3);
    /// index.push(1);
    /// assert_eq!(index.total(), 5);
    /// assert_eq!(index.start_of(2), 4);
    /// ```
    pub fn push(&mut self, rows: usize) {
        let idx = self.heights.len();
        self.heights.push(rows);
        if idx >= self.tree.len() {
            self.rebuild(self.tree.len().max(1) * 2);
        } else {
            fenwick::array::update(&mut self.tree, idx, rows as isize);
        }
    }

    /// Row height of line `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn rows(&self, index: usize) -> usize {
        self.heights[index]
    }

    /// First screen row of line `index`.
    ///
    /// `index == len()` is accepted and yields [`total`](Self::total), the
    /// end of the pad.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn start_of(&self, index: usize) -> usize {
        assert!(
            index <= self.len(),
            "index {} out of bounds (len: {})",
            index,
            self.len()
        );
        if index == 0 {
            0
        } else {
            self.prefix_sum(index - 1)
        }
    }

    /// Total rows of lines `0..=index`.
    fn prefix_sum(&self, index: usize) -> usize {
        fenwick::array::prefix_sum(&self.tree, index).max(0) as usize
    }

    /// Line containing screen row `row`, or `None` past the end.
    ///
    /// ```
    /// # use hexview::view_state::row_index::RowIndex;
    /// let mut index = RowIndex::new(4);
    /// index.push(1); // [0..1)
    /// index.push(2); // [1..3)
    /// index.push(1); // [3..4)
    /// assert_eq!(index.line_at(0), Some(0));
    /// assert_eq!(index.line_at(2), Some(1));
    /// assert_eq!(index.line_at(3), Some(2));
    /// assert_eq!(index.line_at(4), None);
    /// ```
    pub fn line_at(&self, row: usize) -> Option<usize> {
        if self.is_empty() {
            return None;
        }

        // First index whose prefix sum exceeds row
        let mut left = 0;
        let mut right = self.len();
        while left < right {
            let mid = left + (right - left) / 2;
            if self.prefix_sum(mid) > row {
                right = mid;
            } else {
                left = mid + 1;
            }
        }

        (left < self.len()).then_some(left)
    }

    /// Total rows of every indexed line.
    pub fn total(&self) -> usize {
        self.start_of(self.len())
    }

    /// Drops every line, keeping the allocation.
    pub fn clear(&mut self) {
        self.tree.fill(0);
        self.heights.clear();
    }

    fn rebuild(&mut self, capacity: usize) {
        self.tree.clear();
        self.tree.resize(capacity, 0);
        for (idx, &rows) in self.heights.iter().enumerate() {
            fenwick::array::update(&mut self.tree, idx, rows as isize);
        }
    }
}

impl Default for RowIndex {
    fn default() -> Self {
        Self::new(0)
    }
}
