//! The composed generator.
//!
//! Wires scrambler, whitening buffer, packer and bounded sampler into
//! a single owned value. Only the public operations are exposed; the
//! scrambler state and the bit queue stay private so the FIFO
//! invariant cannot be broken from outside.

use std::num::{NonZeroU32, NonZeroUsize};

use rand_core::{RngCore, SeedableRng};

use super::{ConfigError, GeneratorConfig, DEFAULT_SEED};
use crate::sampling::{BitPacker, BoundedSampler, SamplingError};
use crate::scrambler::{WordSource, Xorshift64Star};
use crate::whitening::{WhiteningBuffer, WhiteningStats};

/// Counters describing everything a generator has done so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorStats {
    /// Whitening-stage counters.
    pub whitening: WhiteningStats,
    /// Bits currently buffered.
    pub buffered_bits: usize,
    /// Accepted bounded draws.
    pub bounded_samples: u64,
    /// Rejected bounded-draw candidates.
    pub rejections: u64,
}

/// Xorshift64* generator with Von Neumann whitening.
///
/// # Example
///
/// ```
/// use whitened_rng::WhitenedRng;
///
/// let mut rng = WhitenedRng::new(42);
/// let bit = rng.generate_bit();
/// let byte = rng.generate_bounded(256).unwrap();
/// assert!(bit <= 1);
/// assert!(byte < 256);
/// ```
#[derive(Clone)]
pub struct WhitenedRng<S = Xorshift64Star> {
    buffer: WhiteningBuffer<S>,
    sampler: BoundedSampler,
}

impl WhitenedRng<Xorshift64Star> {
    /// Creates a generator with default settings and the given seed.
    ///
    /// A seed of 0 is replaced by 1.
    pub fn new(seed: u64) -> Self {
        Self {
            buffer: WhiteningBuffer::new(Xorshift64Star::new(seed)),
            sampler: BoundedSampler::new(),
        }
    }

    /// Creates a generator from a validated configuration.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, ConfigError> {
        Self::with_source(Xorshift64Star::new(config.seed), config)
    }
}

impl<S: WordSource> WhitenedRng<S> {
    /// Creates a generator over an arbitrary word source.
    ///
    /// `config.seed` is ignored; the source is used as given. A zero
    /// refill threshold or attempt cap is rejected, matching
    /// [`GeneratorConfig::validate`].
    pub fn with_source(source: S, config: &GeneratorConfig) -> Result<Self, ConfigError> {
        let refill_threshold = NonZeroUsize::new(config.refill_threshold)
            .ok_or(ConfigError::InvalidRefillThreshold)?;

        let sampler = match config.max_attempts {
            Some(limit) => {
                let limit = NonZeroU32::new(limit).ok_or(ConfigError::InvalidAttemptCap)?;
                BoundedSampler::with_max_attempts(limit)
            }
            None => BoundedSampler::new(),
        };

        Ok(Self {
            buffer: WhiteningBuffer::with_refill_threshold(source, refill_threshold),
            sampler,
        })
    }

    /// Generates one whitened bit.
    pub fn generate_bit(&mut self) -> u8 {
        self.buffer.next_bit()
    }

    /// Generates `n` whitened bits in order.
    pub fn generate_bits(&mut self, n: usize) -> Vec<u8> {
        (0..n).map(|_| self.buffer.next_bit()).collect()
    }

    /// Packs `num_bits` whitened bits, least significant first.
    pub fn pack_bits(&mut self, num_bits: u32) -> Result<u64, SamplingError> {
        BitPacker::pack(&mut self.buffer, num_bits)
    }

    /// Generates a uniform integer in `[0, max)`.
    ///
    /// `max <= 1` returns 0 and consumes no bits. Fails only when an
    /// attempt cap is configured and exhausted.
    pub fn generate_bounded(&mut self, max: u64) -> Result<u64, SamplingError> {
        self.sampler.sample(&mut self.buffer, max)
    }

    /// Number of whitened bits buffered and not yet consumed.
    pub fn buffered_bits(&self) -> usize {
        self.buffer.len()
    }

    /// Returns a snapshot of the generator's counters.
    pub fn stats(&self) -> GeneratorStats {
        GeneratorStats {
            whitening: self.buffer.stats(),
            buffered_bits: self.buffer.len(),
            bounded_samples: self.sampler.samples(),
            rejections: self.sampler.rejections(),
        }
    }
}

impl Default for WhitenedRng<Xorshift64Star> {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl<S: WordSource> std::fmt::Debug for WhitenedRng<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhitenedRng")
            .field("buffered_bits", &self.buffer.len())
            .field("stats", &self.buffer.stats())
            .field("max_attempts", &self.sampler.max_attempts())
            .finish()
    }
}

impl<S: WordSource> RngCore for WhitenedRng<S> {
    fn next_u32(&mut self) -> u32 {
        BitPacker::pack_within_width(&mut self.buffer, u32::BITS) as u32
    }

    fn next_u64(&mut self) -> u64 {
        BitPacker::pack_within_width(&mut self.buffer, u64::BITS)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest.iter_mut() {
            *byte = BitPacker::pack_within_width(&mut self.buffer, u8::BITS) as u8;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for WhitenedRng<Xorshift64Star> {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always returns the same word.
    struct ConstantSource(u64);

    impl WordSource for ConstantSource {
        fn next_word(&mut self) -> u64 {
            self.0
        }
    }

    #[test]
    fn test_known_bits_seed_42() {
        let mut rng = WhitenedRng::new(42);
        assert_eq!(
            rng.generate_bits(16),
            vec![0, 0, 1, 0, 1, 0, 1, 1, 0, 0, 0, 1, 1, 0, 1, 1]
        );
    }

    #[test]
    fn test_known_pack_seed_42() {
        let mut rng = WhitenedRng::new(42);
        assert_eq!(rng.pack_bits(16), Ok(55508));
        assert_eq!(rng.buffered_bits(), 20);
    }

    #[test]
    fn test_known_bounded_seed_42() {
        let mut rng = WhitenedRng::new(42);
        let values: Vec<u64> = (0..8).map(|_| rng.generate_bounded(256).unwrap()).collect();
        assert_eq!(values, vec![212, 236, 154, 172, 104, 198, 198, 75]);
    }

    #[test]
    fn test_known_bounded_seed_99() {
        let mut rng = WhitenedRng::new(99);
        let values: Vec<u64> = (0..5).map(|_| rng.generate_bounded(1000).unwrap()).collect();
        assert_eq!(values, vec![125, 471, 737, 933, 531]);
    }

    #[test]
    fn test_zero_seed_matches_one() {
        let mut zero = WhitenedRng::new(0);
        let mut one = WhitenedRng::new(1);

        assert_eq!(zero.generate_bits(8), vec![1, 1, 1, 0, 0, 0, 1, 1]);
        assert_eq!(one.generate_bits(8), vec![1, 1, 1, 0, 0, 0, 1, 1]);
        for _ in 0..100 {
            assert_eq!(zero.generate_bounded(77), one.generate_bounded(77));
        }
    }

    #[test]
    fn test_default_uses_default_seed() {
        let mut default: WhitenedRng = WhitenedRng::default();
        let mut explicit = WhitenedRng::new(1234567890);
        assert_eq!(default.generate_bits(256), explicit.generate_bits(256));
    }

    #[test]
    fn test_degenerate_bounds_leave_buffer_untouched() {
        let mut rng = WhitenedRng::new(5);
        rng.generate_bit();
        let buffered = rng.buffered_bits();

        assert_eq!(rng.generate_bounded(0), Ok(0));
        assert_eq!(rng.generate_bounded(1), Ok(0));
        assert_eq!(rng.buffered_bits(), buffered);
        assert_eq!(rng.stats().whitening.bits_consumed, 1);
    }

    #[test]
    fn test_generate_bits_count_and_values() {
        let mut rng = WhitenedRng::new(3);
        for n in [0, 1, 31, 32, 33, 1000] {
            let bits = rng.generate_bits(n);
            assert_eq!(bits.len(), n);
            assert!(bits.iter().all(|&b| b <= 1));
        }
    }

    #[test]
    fn test_clone_continues_same_stream() {
        let mut rng = WhitenedRng::new(11);
        rng.generate_bits(13);

        let mut copy = rng.clone();
        assert_eq!(rng.generate_bits(500), copy.generate_bits(500));
        assert_eq!(rng.generate_bounded(300), copy.generate_bounded(300));
    }

    #[test]
    fn test_pack_bits_rejects_wide_requests() {
        let mut rng = WhitenedRng::new(1);
        assert_eq!(
            rng.pack_bits(65),
            Err(SamplingError::BitCountTooLarge { requested: 65 })
        );
        assert_eq!(rng.stats().whitening.words_drawn, 0);
    }

    #[test]
    fn test_attempt_cap_from_config() {
        // 0x5555... whitens to all ones, so every candidate is 2^width - 1.
        let config = GeneratorConfig {
            max_attempts: Some(3),
            ..GeneratorConfig::default()
        };
        let mut rng = WhitenedRng::with_source(ConstantSource(0x5555_5555_5555_5555), &config)
            .unwrap();

        assert_eq!(
            rng.generate_bounded(100),
            Err(SamplingError::RejectionLimit {
                max: 100,
                attempts: 3
            })
        );
        assert_eq!(rng.stats().rejections, 3);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GeneratorConfig {
            refill_threshold: 0,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            WhitenedRng::from_config(&config),
            Err(ConfigError::InvalidRefillThreshold)
        ));
    }

    #[test]
    fn test_zero_attempt_cap_rejected() {
        let config = GeneratorConfig {
            max_attempts: Some(0),
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            WhitenedRng::with_source(ConstantSource(0x5555_5555_5555_5555), &config),
            Err(ConfigError::InvalidAttemptCap)
        ));
    }

    #[test]
    fn test_single_attempt_cap_from_config() {
        let config = GeneratorConfig {
            refill_threshold: 1,
            max_attempts: Some(1),
            ..GeneratorConfig::default()
        };
        let mut rng = WhitenedRng::with_source(ConstantSource(0x5555_5555_5555_5555), &config)
            .unwrap();

        assert_eq!(rng.stats().whitening.words_drawn, 0);
        assert_eq!(
            rng.generate_bounded(100),
            Err(SamplingError::RejectionLimit {
                max: 100,
                attempts: 1
            })
        );
        assert_eq!(rng.stats().rejections, 1);
    }

    #[test]
    fn test_stats_track_samples() {
        let mut rng = WhitenedRng::new(8);
        for _ in 0..200 {
            rng.generate_bounded(256).unwrap();
        }

        let stats = rng.stats();
        assert_eq!(stats.bounded_samples, 200);
        // Each attempt packs 9 bits.
        assert_eq!(
            stats.whitening.bits_consumed,
            9 * (stats.bounded_samples + stats.rejections)
        );
        assert_eq!(
            stats.whitening.bits_emitted,
            stats.whitening.bits_consumed + stats.buffered_bits as u64
        );
    }

    #[test]
    fn test_rng_core_packs_bits() {
        let mut a = WhitenedRng::new(42);
        let mut b = WhitenedRng::new(42);

        assert_eq!(a.next_u32() as u64, b.pack_bits(32).unwrap());
        assert_eq!(a.next_u64(), b.pack_bits(64).unwrap());

        let mut bytes = [0u8; 4];
        a.fill_bytes(&mut bytes);
        for byte in bytes {
            assert_eq!(byte as u64, b.pack_bits(8).unwrap());
        }
    }

    #[test]
    fn test_try_fill_matches_fill() {
        let mut a = WhitenedRng::new(6);
        let mut b = WhitenedRng::new(6);
        let mut out_a = [0u8; 17];
        let mut out_b = [0u8; 17];

        a.try_fill_bytes(&mut out_a).unwrap();
        b.fill_bytes(&mut out_b);
        assert_eq!(out_a, out_b);
        assert_eq!(a.stats().whitening.bits_consumed, 17 * 8);
    }

    #[test]
    fn test_seedable_matches_new() {
        let mut seeded: WhitenedRng = WhitenedRng::seed_from_u64(42);
        let mut direct = WhitenedRng::new(42);
        assert_eq!(seeded.generate_bits(64), direct.generate_bits(64));

        let mut from_bytes: WhitenedRng = WhitenedRng::from_seed(42u64.to_le_bytes());
        let mut direct = WhitenedRng::new(42);
        assert_eq!(from_bytes.generate_bits(64), direct.generate_bits(64));
    }
}
