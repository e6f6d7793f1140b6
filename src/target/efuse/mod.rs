//! eFuse field definitions
//!
//! Every named field is a window of bits in one 32-bit word. The word lives
//! at `base + 4 * word`, where `base` is the read address of the eFuse block
//! holding the field.

use crate::{Error, Loader};

pub(crate) mod esp32;
pub(crate) mod esp32c3;
pub(crate) mod esp32s2;
pub(crate) mod esp8266;

/// Extract `(word >> shift) & mask`.
pub const fn extract_bits(word: u32, shift: u32, mask: u32) -> u32 {
    (word >> shift) & mask
}

/// A bit field in an eFuse block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EfuseField {
    pub(crate) base: u32,
    pub(crate) word: u32,
    pub(crate) bit_start: u32,
    pub(crate) bit_count: u32,
}

impl EfuseField {
    pub(crate) const fn new(base: u32, word: u32, bit_start: u32, bit_count: u32) -> Self {
        Self {
            base,
            word,
            bit_start,
            bit_count,
        }
    }

    /// Address of the register holding this field
    pub const fn address(&self) -> u32 {
        self.base + self.word * 4
    }

    /// Mask applied after shifting the word right by `bit_start`
    pub const fn mask(&self) -> u32 {
        if self.bit_count >= 32 {
            u32::MAX
        } else {
            (1 << self.bit_count) - 1
        }
    }

    /// Extract this field from an already read register value
    pub const fn extract(&self, word: u32) -> u32 {
        extract_bits(word, self.bit_start, self.mask())
    }

    /// Read the register holding this field and extract it
    pub async fn read<L: Loader>(&self, loader: &mut L) -> Result<u32, Error> {
        let word = loader.read_reg(self.address()).await?;

        Ok(self.extract(word))
    }
}
