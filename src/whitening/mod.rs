//! Bias removal.
//!
//! This module turns raw scrambler words into a balanced bit stream
//! using the Von Neumann pair rule, and buffers the result so callers
//! can consume it one bit at a time.

mod buffer;
mod von_neumann;

pub use buffer::{WhiteningBuffer, WhiteningStats, DEFAULT_REFILL_THRESHOLD};
pub use von_neumann::{whiten_word, PAIRS_PER_WORD};
