//! Decoder plugins and their registry.
//!
//! A decoder fills the last column. Selectors address it: `0` is the drop
//! transform (empty column), `-1` the printable transform, and `1..=n` the
//! registered plugins in registration order.

pub mod arm;
pub mod bits;
pub mod words;

pub use arm::ArmDecoder;
pub use bits::BitsDecoder;
pub use words::WordsDecoder;

use crate::model::PluginError;
use crate::pipeline::{DropTransform, Printable, Transform};

/// Selector of the drop transform.
pub const DROP_SELECTOR: i64 = 0;

/// Selector of the printable transform.
pub const PRINTABLE_SELECTOR: i64 = -1;

/// A registered decoder.
#[derive(Debug, Clone, Copy)]
pub struct PluginEntry {
    name: &'static str,
    build: fn() -> Box<dyn Transform>,
}

impl PluginEntry {
    /// Entry building its transform with `build`.
    pub const fn new(name: &'static str, build: fn() -> Box<dyn Transform>) -> Self {
        Self { name, build }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Ordered decoder list.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    entries: Vec<PluginEntry>,
}

impl PluginRegistry {
    /// Registry with nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// `arm`, `bits`, `words` at positions 1, 2, 3.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(PluginEntry::new("arm", || Box::new(ArmDecoder)));
        registry.register(PluginEntry::new("bits", || Box::new(BitsDecoder)));
        registry.register(PluginEntry::new("words", || Box::new(WordsDecoder)));
        registry
    }

    /// Append `entry`; its selector is the new length.
    pub fn register(&mut self, entry: PluginEntry) {
        self.entries.push(entry);
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no plugin is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered plugins in selector order.
    pub fn entries(&self) -> &[PluginEntry] {
        &self.entries
    }

    /// Build the transform for `selector`.
    ///
    /// # Errors
    ///
    /// [`PluginError::UnknownPlugin`] if nothing answers to `selector`.
    pub fn select(&self, selector: i64) -> Result<Box<dyn Transform>, PluginError> {
        match selector {
            DROP_SELECTOR => Ok(Box::new(DropTransform)),
            PRINTABLE_SELECTOR => Ok(Box::new(Printable)),
            n if n > 0 => usize::try_from(n - 1)
                .ok()
                .and_then(|idx| self.entries.get(idx))
                .map(|entry| (entry.build)())
                .ok_or(PluginError::UnknownPlugin { selector }),
            _ => Err(PluginError::UnknownPlugin { selector }),
        }
    }
}
