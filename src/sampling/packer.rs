//! Least-significant-bit-first packing.

use super::{BitSource, SamplingError};

/// Assembles unsigned integers from a bit stream.
///
/// The first bit drawn lands in bit position 0, the second in
/// position 1, and so on. No bits are rejected at this layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitPacker;

impl BitPacker {
    /// Widest value that fits the output type.
    pub const MAX_BITS: u32 = u64::BITS;

    /// Draws `num_bits` bits and packs them into `[0, 2^num_bits)`.
    ///
    /// Fails without drawing anything if `num_bits` exceeds 64.
    pub fn pack<B: BitSource + ?Sized>(
        source: &mut B,
        num_bits: u32,
    ) -> Result<u64, SamplingError> {
        if num_bits > Self::MAX_BITS {
            return Err(SamplingError::BitCountTooLarge {
                requested: num_bits,
            });
        }
        Ok(Self::pack_within_width(source, num_bits))
    }

    /// Packs `num_bits` bits; callers guarantee `num_bits <= 64`.
    pub(crate) fn pack_within_width<B: BitSource + ?Sized>(source: &mut B, num_bits: u32) -> u64 {
        debug_assert!(num_bits <= Self::MAX_BITS);
        (0..num_bits).fold(0u64, |acc, position| {
            acc | (u64::from(source.next_bit() & 1) << position)
        })
    }
}
