//! FIFO queue of whitened bits.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use super::von_neumann::{whiten_word, PAIRS_PER_WORD};
use crate::sampling::BitSource;
use crate::scrambler::WordSource;

/// Default number of bits to accumulate per refill.
pub const DEFAULT_REFILL_THRESHOLD: usize = 32;

/// Running counters for the whitening stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WhiteningStats {
    /// Raw words pulled from the source.
    pub words_drawn: u64,
    /// Bits appended to the buffer.
    pub bits_emitted: u64,
    /// Equal pairs dropped by the debiasing rule.
    pub pairs_discarded: u64,
    /// Bits removed from the front of the buffer.
    pub bits_consumed: u64,
}

impl WhiteningStats {
    /// Fraction of raw pairs that survived whitening.
    ///
    /// Returns 0.0 before any word has been drawn.
    pub fn pair_yield(&self) -> f64 {
        if self.words_drawn == 0 {
            return 0.0;
        }
        self.bits_emitted as f64 / (self.words_drawn * PAIRS_PER_WORD as u64) as f64
    }
}

/// Buffers whitened bits pulled from a [`WordSource`].
///
/// Bits are appended only in whole-word groups during a refill and
/// removed one at a time from the front, so the output order is
/// exactly the order in which pairs were whitened.
#[derive(Debug, Clone)]
pub struct WhiteningBuffer<S> {
    source: S,
    bits: VecDeque<u8>,
    refill_threshold: usize,
    stats: WhiteningStats,
}

impl<S: WordSource> WhiteningBuffer<S> {
    /// Creates an empty buffer over `source`.
    pub fn new(source: S) -> Self {
        Self::from_parts(source, DEFAULT_REFILL_THRESHOLD)
    }

    /// Creates a buffer with a custom refill threshold.
    ///
    /// The threshold only controls how many words a refill pulls at
    /// once; any positive value gives the same bit stream. A zero
    /// threshold cannot be expressed, so a refill always makes progress.
    pub fn with_refill_threshold(source: S, refill_threshold: NonZeroUsize) -> Self {
        Self::from_parts(source, refill_threshold.get())
    }

    fn from_parts(source: S, refill_threshold: usize) -> Self {
        debug_assert!(refill_threshold > 0);
        Self {
            source,
            bits: VecDeque::with_capacity(refill_threshold.min(4096) + PAIRS_PER_WORD as usize),
            refill_threshold,
            stats: WhiteningStats::default(),
        }
    }

    /// Removes and returns the oldest buffered bit, refilling if empty.
    pub fn next_bit(&mut self) -> u8 {
        if self.bits.is_empty() {
            self.refill();
        }
        self.stats.bits_consumed += 1;
        // Refill only returns once the buffer holds at least one bit.
        self.bits.pop_front().unwrap_or_default()
    }

    /// Number of bits currently buffered.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns true if no bits are buffered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the configured refill threshold.
    #[inline]
    pub fn refill_threshold(&self) -> usize {
        self.refill_threshold
    }

    /// Returns the running counters.
    #[inline]
    pub fn stats(&self) -> WhiteningStats {
        self.stats
    }

    /// Pulls words until at least `refill_threshold` bits are buffered.
    ///
    /// A word may yield no bits at all, so this loops across as many
    /// words as it takes.
    fn refill(&mut self) {
        let before = self.bits.len();
        let mut words = 0u64;

        while self.bits.len() < self.refill_threshold {
            let word = self.source.next_word();
            let queued = self.bits.len();
            self.bits.extend(whiten_word(word));

            let emitted = (self.bits.len() - queued) as u64;
            self.stats.words_drawn += 1;
            self.stats.bits_emitted += emitted;
            self.stats.pairs_discarded += PAIRS_PER_WORD as u64 - emitted;
            words += 1;
        }

        tracing::trace!(
            words,
            bits_added = self.bits.len() - before,
            buffered = self.bits.len(),
            "Refilled whitening buffer"
        );
    }
}

impl<S: WordSource> BitSource for WhiteningBuffer<S> {
    #[inline]
    fn next_bit(&mut self) -> u8 {
        WhiteningBuffer::next_bit(self)
    }
}
