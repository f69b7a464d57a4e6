//! Xorshift64* scrambler.
//!
//! Three xor-shift steps on a 64-bit state followed by a multiplicative
//! finish. The state is a pure function of the seed and the number of
//! words drawn, so equal seeds give equal streams forever.

use super::WordSource;

/// Multiplier applied to the state to produce each output word.
const MULTIPLIER: u64 = 2685821657736338717;

/// Deterministic Xorshift64* word generator.
///
/// The state is never zero: zero is a fixed point of the xor-shift
/// recurrence, so a zero seed is replaced by 1 and the recurrence
/// (an invertible linear map) cannot reach zero from anywhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xorshift64Star {
    state: u64,
}

impl Xorshift64Star {
    /// Creates a scrambler from a seed, mapping 0 to 1.
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 {
            tracing::debug!("zero seed replaced by 1");
            1
        } else {
            seed
        };
        Self { state }
    }

    /// Returns the current internal state.
    #[inline]
    pub fn state(&self) -> u64 {
        self.state
    }
}

impl WordSource for Xorshift64Star {
    #[inline]
    fn next_word(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 12;
        x ^= x >> 25;
        x ^= x << 27;
        self.state = x;
        x.wrapping_mul(MULTIPLIER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_answers_default_seed() {
        let mut scrambler = Xorshift64Star::new(1234567890);

        assert_eq!(scrambler.next_word(), 7236655401859279854);
        assert_eq!(scrambler.next_word(), 687008400670391069);
        assert_eq!(scrambler.next_word(), 4337390800617819683);
    }

    #[test]
    fn test_zero_seed_behaves_like_one() {
        let mut zero = Xorshift64Star::new(0);
        let mut one = Xorshift64Star::new(1);

        assert_eq!(zero.state(), 1);
        assert_eq!(zero.next_word(), 14229403333805649181);
        assert_eq!(one.next_word(), 14229403333805649181);
        assert_eq!(zero.next_word(), one.next_word());
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = Xorshift64Star::new(42);
        let mut b = Xorshift64Star::new(42);

        for _ in 0..1000 {
            assert_eq!(a.next_word(), b.next_word());
        }
    }

    #[test]
    fn test_state_never_zero() {
        for seed in [0, 1, 2, u64::MAX, 1 << 63, 0x8000_0000] {
            let mut scrambler = Xorshift64Star::new(seed);
            for _ in 0..10_000 {
                scrambler.next_word();
                assert_ne!(scrambler.state(), 0);
            }
        }
    }
}
