//! 32-bit little-endian words, each tagged with its file offset.

use crate::pipeline::{Rendered, Transform};

/// One row per word: `00000010: DEADBEEF`.
///
/// Index-aware; without an offset the address reads `????????`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordsDecoder;

fn word_hex(word: &[u8]) -> String {
    word.iter().rev().map(|b| format!("{b:02X}")).collect()
}

fn rows(bytes: &[u8], offset: Option<u64>) -> Rendered {
    let rows = bytes
        .chunks(4)
        .enumerate()
        .map(|(i, word)| match offset {
            Some(base) => format!("{:08X}: {}", base + 4 * i as u64, word_hex(word)),
            None => format!("????????: {}", word_hex(word)),
        })
        .collect();
    Rendered::rows(rows)
}

impl Transform for WordsDecoder {
    fn name(&self) -> &str {
        "words"
    }

    fn wants_index(&self) -> bool {
        true
    }

    fn render(&self, bytes: &[u8]) -> Option<Rendered> {
        Some(rows(bytes, None))
    }

    fn render_at(&self, bytes: &[u8], offset: u64) -> Option<Rendered> {
        Some(rows(bytes, Some(offset)))
    }
}
