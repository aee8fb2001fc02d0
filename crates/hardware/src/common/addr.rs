//! Address decomposition.
//!
//! Splits a byte address into its three fields for a given cache geometry:
//!
//! ```text
//!   | tag | set index | block offset |
//!          index_bits   offset_bits
//! ```
//!
//! The block offset is discarded; only the set index and tag matter for
//! hit/miss classification.

use crate::config::Config;

/// Precomputed shift and mask for one cache geometry.
///
/// Built once from a validated [`Config`]; the field widths are exact because
/// every geometry parameter is a power of two.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressLayout {
    offset_bits: u32,
    index_bits: u32,
    index_mask: u64,
}

impl AddressLayout {
    /// Derives the layout for `config`.
    ///
    /// # Arguments
    ///
    /// * `config` - A validated cache configuration.
    ///
    /// # Returns
    ///
    /// The address layout with `log2(block_size)` offset bits and
    /// `log2(num_sets)` index bits.
    pub const fn new(config: &Config) -> Self {
        let offset_bits = config.block_size().trailing_zeros();
        let index_bits = config.num_sets().trailing_zeros();
        Self {
            offset_bits,
            index_bits,
            index_mask: (1u64 << index_bits) - 1,
        }
    }

    /// Number of low address bits selecting a byte within a block.
    #[inline(always)]
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Number of address bits selecting the set.
    #[inline(always)]
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Extracts the set index of `addr`.
    #[inline(always)]
    pub const fn set_index(&self, addr: u64) -> usize {
        ((addr >> self.offset_bits) & self.index_mask) as usize
    }

    /// Extracts the tag of `addr`.
    ///
    /// Uses a checked shift so that a geometry covering all 64 address bits
    /// yields tag 0 instead of overflowing.
    #[inline(always)]
    pub const fn tag(&self, addr: u64) -> u64 {
        match addr.checked_shr(self.offset_bits + self.index_bits) {
            Some(tag) => tag,
            None => 0,
        }
    }

    /// Splits `addr` into `(set_index, tag)`.
    #[inline(always)]
    pub const fn split(&self, addr: u64) -> (usize, u64) {
        (self.set_index(addr), self.tag(addr))
    }
}
