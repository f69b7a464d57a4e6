//! Raw word generation.
//!
//! This module produces the deterministic 64-bit words that feed the
//! whitening stage. The words are pseudorandom but carry no guarantee
//! of balance; debiasing is the job of [`crate::whitening`].

mod xorshift;

pub use xorshift::Xorshift64Star;

/// A source of raw 64-bit words.
///
/// This abstraction allows the whitening stage to run on the real
/// scrambler or on synthetic sources (constant, scripted, biased)
/// for testing.
pub trait WordSource {
    /// Produces the next raw word, advancing internal state.
    fn next_word(&mut self) -> u64;
}
