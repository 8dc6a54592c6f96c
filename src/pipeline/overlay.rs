//! Per-line cache overlay for the decoder column.

use super::transform::Rendered;
use std::collections::BTreeMap;

/// Mapping from absolute file line to a previously computed decoder value.
///
/// Entries are keyed by file line, not by buffer position, so they outlive
/// file-window reloads. They are added and removed explicitly and cleared
/// wholesale when the decoder is switched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    entries: BTreeMap<u64, Rendered>,
}

impl Overlay {
    /// Empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `line`, if any.
    pub fn get(&self, line: u64) -> Option<&Rendered> {
        self.entries.get(&line)
    }

    /// True when `line` has a cached value.
    pub fn contains(&self, line: u64) -> bool {
        self.entries.contains_key(&line)
    }

    /// Cache `value` for `line`, returning the value it replaced.
    pub fn insert(&mut self, line: u64, value: Rendered) -> Option<Rendered> {
        self.entries.insert(line, value)
    }

    /// Drop the cached value for `line`.
    pub fn remove(&mut self, line: u64) -> Option<Rendered> {
        self.entries.remove(&line)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached lines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached lines in ascending order.
    pub fn lines(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.keys().copied()
    }
}
