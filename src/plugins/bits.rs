//! Binary dump of each byte.

use crate::pipeline::{Rendered, Transform};

/// `01000001 01000010` style rendering, one row.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitsDecoder;

impl Transform for BitsDecoder {
    fn name(&self) -> &str {
        "bits"
    }

    fn render(&self, bytes: &[u8]) -> Option<Rendered> {
        let groups: Vec<String> = bytes.iter().map(|b| format!("{b:08b}")).collect();
        Some(Rendered::line(groups.join(" ")))
    }
}
