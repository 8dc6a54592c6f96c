//! ARM instruction class decoder.
//!
//! Each line is split into 32-bit little-endian words and every word is
//! classified from bits 25..=27. Words that match no class are shown as
//! their four bytes in binary.

use crate::pipeline::{Rendered, Transform};

/// One row per instruction word.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArmDecoder;

/// Instruction class of one 32-bit word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionClass {
    /// Bits 27..25 are `101`.
    Branch,
    /// Bits 27..25 are `000`.
    DataProcessing,
    /// Bits 27..26 are `01`.
    Memory,
    /// Anything else.
    Unknown,
}

impl InstructionClass {
    /// Classify `word`.
    pub fn of(word: u32) -> Self {
        match (word >> 25) & 0b111 {
            0b101 => Self::Branch,
            0b000 => Self::DataProcessing,
            _ if (word >> 26) & 0b11 == 0b01 => Self::Memory,
            _ => Self::Unknown,
        }
    }

    fn label(self) -> Option<&'static str> {
        match self {
            Self::Branch => Some("Branch"),
            Self::DataProcessing => Some("Proc Data"),
            Self::Memory => Some("Memory"),
            Self::Unknown => None,
        }
    }
}

fn bit_groups(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:08b}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn describe(word: &[u8]) -> String {
    if word.len() < 4 {
        return bit_groups(word);
    }
    let value = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
    match InstructionClass::of(value).label() {
        Some(label) => label.to_string(),
        None => bit_groups(word),
    }
}

impl Transform for ArmDecoder {
    fn name(&self) -> &str {
        "arm"
    }

    fn render(&self, bytes: &[u8]) -> Option<Rendered> {
        Some(Rendered::rows(bytes.chunks(4).map(describe).collect()))
    }
}
