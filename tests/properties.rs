//! Property tests for the public generator operations.

use proptest::prelude::*;
use whitened_rng::{GeneratorConfig, WhitenedRng, WordSource, Xorshift64Star};

/// Scrambler words masked so each bit is one with probability 1/8.
struct SkewedSource(Xorshift64Star);

impl WordSource for SkewedSource {
    fn next_word(&mut self) -> u64 {
        self.0.next_word() & self.0.next_word() & self.0.next_word()
    }
}

proptest! {
    #[test]
    fn bounded_values_stay_in_range(seed: u64, max in 2u64..=u64::MAX, draws in 1usize..50) {
        let mut rng = WhitenedRng::new(seed);
        for _ in 0..draws {
            let value = rng.generate_bounded(max).unwrap();
            prop_assert!(value < max);
        }
    }

    #[test]
    fn small_bounds_stay_in_range(seed: u64, max in 2u64..20) {
        let mut rng = WhitenedRng::new(seed);
        for _ in 0..200 {
            prop_assert!(rng.generate_bounded(max).unwrap() < max);
        }
    }

    #[test]
    fn degenerate_bounds_consume_nothing(seed: u64, warmup in 0usize..100, max in 0u64..=1) {
        let mut rng = WhitenedRng::new(seed);
        rng.generate_bits(warmup);
        let before = rng.stats();

        prop_assert_eq!(rng.generate_bounded(max), Ok(0));
        prop_assert_eq!(rng.stats(), before);
    }

    #[test]
    fn generate_bits_returns_exact_count(seed: u64, n in 0usize..2000) {
        let mut rng = WhitenedRng::new(seed);
        let bits = rng.generate_bits(n);
        prop_assert_eq!(bits.len(), n);
        prop_assert!(bits.iter().all(|&b| b <= 1));
    }

    #[test]
    fn packed_values_fit_width(seed: u64, num_bits in 0u32..64) {
        let mut rng = WhitenedRng::new(seed);
        let value = rng.pack_bits(num_bits).unwrap();
        prop_assert!(value < (1u64 << num_bits));
    }

    #[test]
    fn packing_matches_bit_stream(seed: u64, num_bits in 0u32..=64) {
        let mut packed = WhitenedRng::new(seed);
        let mut unpacked = WhitenedRng::new(seed);

        let value = packed.pack_bits(num_bits).unwrap();
        let expected = unpacked
            .generate_bits(num_bits as usize)
            .iter()
            .enumerate()
            .fold(0u64, |acc, (i, &b)| acc | (u64::from(b) << i));
        prop_assert_eq!(value, expected);
    }

    #[test]
    fn same_seed_same_outputs(seed: u64, max in 2u64..100_000) {
        let mut a = WhitenedRng::new(seed);
        let mut b = WhitenedRng::new(seed);

        prop_assert_eq!(a.generate_bits(97), b.generate_bits(97));
        for _ in 0..20 {
            prop_assert_eq!(a.generate_bounded(max), b.generate_bounded(max));
        }
        prop_assert_eq!(a.pack_bits(33), b.pack_bits(33));
    }

    #[test]
    fn refill_threshold_does_not_change_stream(seed: u64, threshold in 1usize..300) {
        let config = GeneratorConfig { seed, refill_threshold: threshold, max_attempts: None };
        let mut tuned = WhitenedRng::from_config(&config).unwrap();
        let mut default = WhitenedRng::new(seed);

        prop_assert_eq!(tuned.generate_bits(500), default.generate_bits(500));
    }

    #[test]
    fn scrambler_state_never_zero(seed: u64) {
        let mut scrambler = Xorshift64Star::new(seed);
        for _ in 0..1000 {
            scrambler.next_word();
            prop_assert_ne!(scrambler.state(), 0);
        }
    }
}

#[test]
fn zero_seed_matches_one() {
    let mut zero = WhitenedRng::new(0);
    let mut one = WhitenedRng::new(1);
    assert_eq!(zero.generate_bits(1000), one.generate_bits(1000));
}

#[test]
fn balanced_over_large_sample() {
    let mut rng = WhitenedRng::new(1234567890);
    let n = 100_000;
    let ones: usize = rng.generate_bits(n).iter().map(|&b| b as usize).sum();
    let fraction = ones as f64 / n as f64;

    assert!((fraction - 0.5).abs() < 0.01, "fraction of ones: {fraction}");
}

#[test]
fn skewed_source_is_balanced_after_whitening() {
    let source = SkewedSource(Xorshift64Star::new(2024));
    let mut rng = WhitenedRng::with_source(source, &GeneratorConfig::default()).unwrap();

    let n = 100_000;
    let bits = rng.generate_bits(n);
    let ones = bits.iter().filter(|&&b| b == 1).count() as f64;
    let zeros = n as f64 - ones;

    // Chi-square against a fair coin, p = 0.0001 critical value.
    let chi_square = (zeros - ones).powi(2) / n as f64;
    assert!(chi_square < 15.13, "chi-square: {chi_square}");
    assert!((ones / n as f64 - 0.5).abs() < 0.01);
}

#[test]
fn bounded_samples_cover_range_evenly() {
    let mut rng = WhitenedRng::new(42);
    let mut counts = [0u32; 10];
    for _ in 0..50_000 {
        counts[rng.generate_bounded(10).unwrap() as usize] += 1;
    }

    for count in counts {
        assert!((4_500..=5_500).contains(&count), "bucket count {count}");
    }
}
