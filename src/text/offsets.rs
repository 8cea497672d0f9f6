//! Offset conversion between caller units and byte positions
//!
//! Classifiers report positions either as Unicode scalar counts or as UTF-16
//! code units (JavaScript string indices). Rust strings are indexed by byte,
//! so every offset is resolved to a byte position once, when an annotation set
//! is validated.
//!
//! ```text
//! Text:   "a😀b"
//!
//! Byte    a=0   😀=1..5   b=5      len 6
//! Char    a=0   😀=1      b=2      len 3
//! UTF-16  a=0   😀=1,2    b=3      len 4   (offset 2 splits the pair)
//! ```

use serde::{Deserialize, Serialize};

/// What one offset step counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetUnit {
    /// Unicode scalar values (Rust `char`)
    #[default]
    Char,
    /// UTF-16 code units, as counted by `String.prototype.length`
    Utf16,
}

impl OffsetUnit {
    /// Length of `text` measured in this unit
    pub fn measure(self, text: &str) -> usize {
        match self {
            OffsetUnit::Char => text.chars().count(),
            OffsetUnit::Utf16 => text.encode_utf16().count(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OffsetUnit::Char => "char",
            OffsetUnit::Utf16 => "utf16",
        }
    }
}

/// Lookup table from unit offsets to byte positions for one text
#[derive(Debug, Clone)]
pub struct OffsetIndex {
    unit: OffsetUnit,
    /// Byte position of every unit boundary, `None` between surrogate halves.
    /// Left empty for ASCII text, where unit offsets equal byte offsets.
    boundaries: Vec<Option<usize>>,
    len: usize,
}

impl OffsetIndex {
    pub fn new(text: &str, unit: OffsetUnit) -> Self {
        if text.is_ascii() {
            return Self {
                unit,
                boundaries: Vec::new(),
                len: text.len(),
            };
        }

        let mut boundaries = Vec::with_capacity(text.len() + 1);
        for (byte, ch) in text.char_indices() {
            boundaries.push(Some(byte));
            if unit == OffsetUnit::Utf16 && ch.len_utf16() == 2 {
                boundaries.push(None);
            }
        }
        boundaries.push(Some(text.len()));

        let len = boundaries.len() - 1;
        Self {
            unit,
            boundaries,
            len,
        }
    }

    pub fn unit(&self) -> OffsetUnit {
        self.unit
    }

    /// Text length in this index's unit
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte position for a unit offset
    ///
    /// Returns `None` when the offset is past the end of the text or falls
    /// between the two halves of a surrogate pair.
    pub fn to_byte(&self, offset: usize) -> Option<usize> {
        if self.boundaries.is_empty() {
            return (offset <= self.len).then_some(offset);
        }
        self.boundaries.get(offset).copied().flatten()
    }
}
