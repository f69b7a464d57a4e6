//! Prometheus metrics for generator monitoring.
//!
//! # Metrics Exposed
//!
//! ## Whitening Metrics
//! - `whitened_rng_words_drawn_total` - Raw words pulled from the scrambler
//! - `whitened_rng_bits_emitted_total` - Bits surviving Von Neumann whitening
//! - `whitened_rng_pairs_discarded_total` - Equal pairs dropped
//! - `whitened_rng_bits_consumed_total` - Bits handed to callers
//! - `whitened_rng_buffered_bits` - Bits waiting in the buffer
//!
//! ## Sampling Metrics
//! - `whitened_rng_bounded_samples_total` - Accepted bounded draws
//! - `whitened_rng_rejections_total` - Rejected candidates
//!
//! ## Report Metrics
//! - `whitened_rng_report_bit_deviation` - One-bit fraction deviation from 0.5
//! - `whitened_rng_report_bit_chi_square` - Bit chi-square statistic
//! - `whitened_rng_report_sample_mean` - Mean bounded sample
//!
//! # Example
//!
//! ```
//! use whitened_rng::{metrics::MetricsRegistry, WhitenedRng};
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//!
//! let mut rng = WhitenedRng::new(42);
//! rng.generate_bits(100);
//! registry.update(&rng.stats());
//!
//! let text = registry.encode().unwrap();
//! assert!(text.contains("whitened_rng_bits_consumed_total 100"));
//! ```

mod collector;

pub use collector::{MetricsError, MetricsRegistry};
