//! Built-in column transforms.

use super::transform::{Rendered, Transform};
use serde::Deserialize;

/// Static column kinds available to the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnKind {
    /// Absolute offset of the line's first byte.
    LineNumber,
    /// Space-separated two-digit hex bytes.
    Hex,
    /// Printable rendering, one three-cell slot per byte.
    Printable,
}

impl ColumnKind {
    /// Instantiate the transform for this kind.
    pub fn transform(self) -> Box<dyn Transform> {
        match self {
            ColumnKind::LineNumber => Box::new(LineNumber),
            ColumnKind::Hex => Box::new(HexBytes),
            ColumnKind::Printable => Box::new(Printable),
        }
    }
}

/// Emits nothing; selecting it empties the decoder column.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropTransform;

impl Transform for DropTransform {
    fn name(&self) -> &str {
        "none"
    }

    fn render(&self, _bytes: &[u8]) -> Option<Rendered> {
        None
    }
}

/// `00 1F A0` style hex dump of the line.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexBytes;

impl Transform for HexBytes {
    fn name(&self) -> &str {
        "hex"
    }

    fn render(&self, bytes: &[u8]) -> Option<Rendered> {
        let hex: Vec<String> = bytes.iter().map(|b| format!("{b:02X}")).collect();
        Some(Rendered::line(hex.join(" ")))
    }
}

/// Printable rendering with control bytes shown as `^X` and high bytes as `M-x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Printable;

impl Transform for Printable {
    fn name(&self) -> &str {
        "printable"
    }

    fn render(&self, bytes: &[u8]) -> Option<Rendered> {
        let row: String = bytes.iter().map(|&b| format!("{:<3}", unctrl(b))).collect();
        Some(Rendered::line(row))
    }
}

/// Offset of the line's first byte in hex. Index-aware.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineNumber;

impl Transform for LineNumber {
    fn name(&self) -> &str {
        "line-number"
    }

    fn wants_index(&self) -> bool {
        true
    }

    fn render(&self, _bytes: &[u8]) -> Option<Rendered> {
        Some(Rendered::line("??"))
    }

    fn render_at(&self, _bytes: &[u8], offset: u64) -> Option<Rendered> {
        Some(Rendered::line(format!("{offset:08X}")))
    }
}

/// Terminal-safe spelling of a single byte.
pub fn unctrl(byte: u8) -> String {
    match byte {
        0x20..=0x7E => char::from(byte).to_string(),
        0x7F => "^?".to_string(),
        0x00..=0x1F => format!("^{}", char::from(byte + 0x40)),
        _ => format!("M-{}", unctrl(byte - 0x80)),
    }
}
