//! Uniform integers in `[0, max)` by rejection sampling.

use std::num::NonZeroU32;

use super::{BitPacker, BitSource, SamplingError};

/// Draws uniform integers below an exclusive bound.
///
/// Candidates are packed at the bit width of `max` itself and
/// rejected until one falls below `max`. For a power of two this
/// uses one more bit than strictly needed (256 draws 9-bit values),
/// so the expected rejection rate for exact powers of two is close
/// to one half. Changing the width would change the stream.
///
/// The loop is unbounded unless an attempt cap is set, in which case
/// running out of attempts is reported as an error instead.
#[derive(Debug, Clone, Default)]
pub struct BoundedSampler {
    /// Maximum candidates per draw, if capped.
    max_attempts: Option<u32>,
    /// Accepted draws.
    samples: u64,
    /// Rejected candidates across all draws.
    rejections: u64,
}

impl BoundedSampler {
    /// Creates a sampler with no attempt cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sampler that gives up after `max_attempts` candidates.
    ///
    /// A zero cap cannot be expressed; every draw gets at least one attempt.
    pub fn with_max_attempts(max_attempts: NonZeroU32) -> Self {
        Self {
            max_attempts: Some(max_attempts.get()),
            ..Self::default()
        }
    }

    /// Number of bits used for candidates when sampling below `max`.
    #[inline]
    pub fn bit_width(max: u64) -> u32 {
        u64::BITS - max.leading_zeros()
    }

    /// Draws a uniform value in `[0, max)`.
    ///
    /// `max <= 1` returns 0 without drawing any bits.
    pub fn sample<B: BitSource + ?Sized>(
        &mut self,
        source: &mut B,
        max: u64,
    ) -> Result<u64, SamplingError> {
        if max <= 1 {
            return Ok(0);
        }

        let width = Self::bit_width(max);
        let mut attempts: u32 = 0;

        loop {
            if let Some(limit) = self.max_attempts {
                if attempts >= limit {
                    tracing::warn!(max, attempts, "Rejection sampling gave up");
                    return Err(SamplingError::RejectionLimit { max, attempts });
                }
            }

            let candidate = BitPacker::pack_within_width(source, width);
            attempts = attempts.saturating_add(1);

            if candidate < max {
                self.samples += 1;
                return Ok(candidate);
            }

            self.rejections += 1;
            tracing::trace!(max, candidate, attempts, "Rejected candidate");
        }
    }

    /// Returns the attempt cap, if any.
    pub fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    /// Number of accepted draws.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Number of rejected candidates.
    pub fn rejections(&self) -> u64 {
        self.rejections
    }
}
