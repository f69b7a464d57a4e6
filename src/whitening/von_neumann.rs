//! Von Neumann debiasing of a single word.
//!
//! A word is read as 32 non-overlapping bit pairs, least significant
//! pair first. Unequal pairs emit their low bit; equal pairs are
//! dropped. For independent bits P(01) = P(10) whatever the bias,
//! so every emitted bit is a fair coin.

/// Number of bit pairs in a 64-bit word.
pub const PAIRS_PER_WORD: u32 = u64::BITS / 2;

/// Whitens one word, yielding the surviving bits in pair order.
///
/// `(1,0)` (low bit first) yields 1, `(0,1)` yields 0, and `(0,0)` or
/// `(1,1)` yield nothing.
pub fn whiten_word(word: u64) -> impl Iterator<Item = u8> {
    (0..PAIRS_PER_WORD).filter_map(move |pair| {
        let low = (word >> (2 * pair)) & 1;
        let high = (word >> (2 * pair + 1)) & 1;
        (low != high).then_some(low as u8)
    })
}
