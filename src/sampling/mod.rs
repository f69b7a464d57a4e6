//! Integer assembly from whitened bits.
//!
//! [`BitPacker`] turns a run of bits into an unsigned integer and
//! [`BoundedSampler`] uses it with rejection sampling to draw uniform
//! values from `[0, max)`.

mod bounded;
mod packer;

pub use bounded::BoundedSampler;
pub use packer::BitPacker;

use thiserror::Error;

/// A source of single unbiased bits.
///
/// Implemented by [`crate::whitening::WhiteningBuffer`]; tests use
/// scripted implementations to pin down exact bit sequences.
pub trait BitSource {
    /// Produces the next bit (0 or 1).
    fn next_bit(&mut self) -> u8;
}

/// Errors that can occur while packing or sampling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SamplingError {
    #[error("cannot pack {requested} bits into a 64-bit integer")]
    BitCountTooLarge { requested: u32 },

    #[error("no candidate below {max} after {attempts} attempts")]
    RejectionLimit { max: u64, attempts: u32 },
}
