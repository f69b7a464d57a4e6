//! Public generator interface.
//!
//! Composes the scrambler, whitening and sampling stages into
//! [`WhitenedRng`] and provides its configuration types.

mod config;
mod rng;

pub use config::{ConfigError, FileConfig, GeneratorConfig};
pub use rng::{GeneratorStats, WhitenedRng};

/// Seed used when none is supplied.
pub const DEFAULT_SEED: u64 = 1234567890;

/// Default exclusive upper bound for bounded draws.
pub const DEFAULT_BOUND: u64 = 256;
