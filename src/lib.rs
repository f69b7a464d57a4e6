//! Whitened RNG Library
//!
//! A deterministic pseudorandom bit generator built from a fast
//! Xorshift64* scrambler and a Von Neumann whitening stage, with a
//! rejection-sampled bounded integer sampler on top.
//!
//! # Architecture
//!
//! The system is pull-based; each layer loops on the one below until
//! it can satisfy its caller:
//!
//! ```text
//! sampling (bounded) → sampling (packer) → whitening → scrambler
//!        ↓
//!   analysis / metrics (consumers)
//! ```
//!
//! # Design Principles
//!
//! - **Deterministic**: equal seeds give equal bits, words and samples
//! - **Balanced**: whitening removes bias from any source whose pair bits are independent
//! - **Not cryptographic**: the state is trivially recoverable from output
//! - **Single owner**: one generator, one thread, no shared state
//!
//! # Example
//!
//! ```
//! use whitened_rng::{
//!     analysis::{DistributionReport, QualityThresholds, ReportConfig},
//!     WhitenedRng,
//! };
//!
//! let mut rng = WhitenedRng::new(42);
//!
//! let bits = rng.generate_bits(8);
//! let packed = rng.pack_bits(3).unwrap();
//! let byte = rng.generate_bounded(256).unwrap();
//! assert_eq!(bits.len(), 8);
//! assert!(packed < 8);
//! assert!(byte < 256);
//!
//! let report = DistributionReport::collect(&mut rng, &ReportConfig::default()).unwrap();
//! assert!(QualityThresholds::permissive().check(&report).is_ok());
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod generator;
pub mod metrics;
pub mod sampling;
pub mod scrambler;
pub mod whitening;

// Re-export commonly used types at crate root
pub use analysis::{DistributionReport, QualityThresholds, ReportConfig};
pub use generator::{
    ConfigError, FileConfig, GeneratorConfig, GeneratorStats, WhitenedRng, DEFAULT_BOUND,
    DEFAULT_SEED,
};
pub use sampling::{BitPacker, BitSource, BoundedSampler, SamplingError};
pub use scrambler::{WordSource, Xorshift64Star};
pub use whitening::{WhiteningBuffer, WhiteningStats};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
