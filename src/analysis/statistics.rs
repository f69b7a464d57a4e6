//! Distribution statistics for generator output.
//!
//! These are sanity checks for spotting a broken generator, not
//! proofs of randomness. A correct generator will still fail them
//! now and then.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::generator::{ConfigError, WhitenedRng, DEFAULT_BOUND};
use crate::sampling::SamplingError;
use crate::scrambler::WordSource;

/// Parameters for collecting a [`DistributionReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of bounded samples; eight times as many bits are drawn.
    pub count: usize,
    /// Exclusive upper bound for bounded samples.
    pub max: u64,
    /// Number of histogram buckets.
    pub buckets: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            count: 1000,
            max: DEFAULT_BOUND,
            buckets: 8,
        }
    }
}

impl ReportConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buckets == 0 {
            return Err(ConfigError::InvalidBucketCount);
        }
        Ok(())
    }
}

/// Counts of zero and one bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitBalance {
    /// Number of zero bits.
    pub zeros: u64,
    /// Number of one bits.
    pub ones: u64,
}

impl BitBalance {
    /// Tallies a bit sequence.
    pub fn count(bits: &[u8]) -> Self {
        let ones = bits.iter().filter(|&&b| b != 0).count() as u64;
        Self {
            zeros: bits.len() as u64 - ones,
            ones,
        }
    }

    /// Total number of bits.
    pub fn total(&self) -> u64 {
        self.zeros + self.ones
    }

    /// Fraction of bits that are one (0.5 if empty).
    pub fn one_fraction(&self) -> f64 {
        if self.total() == 0 {
            return 0.5;
        }
        self.ones as f64 / self.total() as f64
    }

    /// Absolute deviation of the one fraction from 0.5.
    pub fn deviation(&self) -> f64 {
        (self.one_fraction() - 0.5).abs()
    }

    /// Chi-square statistic against a fair coin (one degree of freedom).
    pub fn chi_square(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        let diff = self.zeros as f64 - self.ones as f64;
        diff * diff / self.total() as f64
    }
}

/// Summary of bounded samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    /// Number of samples.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Smallest sample (0 if empty).
    pub min: u64,
    /// Largest sample (0 if empty).
    pub max: u64,
    /// Mean absolute difference between consecutive samples.
    pub successive_difference: f64,
}

impl SampleSummary {
    /// Summarises a sample sequence.
    pub fn summarize(samples: &[u64]) -> Self {
        let count = samples.len();
        let mean = if count == 0 {
            0.0
        } else {
            samples.iter().map(|&v| v as f64).sum::<f64>() / count as f64
        };

        let successive_difference = if count < 2 {
            0.0
        } else {
            samples
                .windows(2)
                .map(|w| w[0].abs_diff(w[1]) as f64)
                .sum::<f64>()
                / (count - 1) as f64
        };

        Self {
            count,
            mean,
            min: samples.iter().copied().min().unwrap_or(0),
            max: samples.iter().copied().max().unwrap_or(0),
            successive_difference,
        }
    }
}

/// Equal-width frequency histogram over `[0, bound)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    /// Exclusive upper bound of the sampled range.
    pub bound: u64,
    /// Values per bucket.
    pub bucket_width: u64,
    /// Sample count per bucket.
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Buckets `samples` into `buckets` ranges covering `[0, bound)`.
    ///
    /// Values at or past the last boundary land in the last bucket.
    pub fn build(samples: &[u64], bound: u64, buckets: usize) -> Self {
        let buckets = buckets.max(1);
        let bucket_width = bound.div_ceil(buckets as u64).max(1);
        let mut counts = vec![0u64; buckets];

        for &value in samples {
            let index = ((value / bucket_width) as usize).min(buckets - 1);
            counts[index] += 1;
        }

        Self {
            bound,
            bucket_width,
            counts,
        }
    }

    /// Inclusive value range covered by bucket `index`.
    pub fn range(&self, index: usize) -> (u64, u64) {
        let start = (index as u64).saturating_mul(self.bucket_width);
        let end = start
            .saturating_add(self.bucket_width)
            .min(self.bound.max(1))
            .saturating_sub(1);
        (start, end.max(start))
    }

    /// Total number of samples counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Chi-square statistic against a uniform distribution on `[0, bound)`.
    ///
    /// Buckets that cannot receive any value are skipped.
    pub fn chi_square(&self) -> f64 {
        let total = self.total() as f64;
        if total == 0.0 || self.bound == 0 {
            return 0.0;
        }

        self.counts
            .iter()
            .enumerate()
            .filter_map(|(index, &observed)| {
                let start = (index as u64).checked_mul(self.bucket_width)?;
                if start >= self.bound {
                    return None;
                }
                let size = (self.bound - start).min(self.bucket_width);
                let expected = total * size as f64 / self.bound as f64;
                Some((observed as f64 - expected).powi(2) / expected)
            })
            .sum()
    }
}

/// Statistics over a batch of generator output.
#[derive(Debug, Clone)]
pub struct DistributionReport {
    /// When the data was collected.
    pub generated_at: DateTime<Utc>,
    /// Parameters used for collection.
    pub config: ReportConfig,
    /// Bit-level balance.
    pub bits: BitBalance,
    /// Bounded sample summary.
    pub samples: SampleSummary,
    /// Frequency distribution of bounded samples.
    pub histogram: Histogram,
}

impl DistributionReport {
    /// Draws `count * 8` bits and `count` bounded samples and analyses them.
    pub fn collect<S: WordSource>(
        rng: &mut WhitenedRng<S>,
        config: &ReportConfig,
    ) -> Result<Self, SamplingError> {
        let bits = rng.generate_bits(config.count.saturating_mul(8));
        let samples = (0..config.count)
            .map(|_| rng.generate_bounded(config.max))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            bits = bits.len(),
            samples = samples.len(),
            max = config.max,
            "Collected generator output"
        );

        Ok(Self::analyze(&bits, &samples, config))
    }

    /// Analyses already-collected bits and samples.
    pub fn analyze(bits: &[u8], samples: &[u64], config: &ReportConfig) -> Self {
        Self {
            generated_at: Utc::now(),
            config: config.clone(),
            bits: BitBalance::count(bits),
            samples: SampleSummary::summarize(samples),
            histogram: Histogram::build(samples, config.max, config.buckets),
        }
    }

    /// Mean expected from a uniform distribution on `[0, max)`.
    pub fn expected_mean(&self) -> f64 {
        self.config.max.saturating_sub(1) as f64 / 2.0
    }

    /// Expected mean absolute difference of two independent uniform draws.
    pub fn expected_successive_difference(&self) -> f64 {
        let n = self.config.max as f64;
        if n <= 1.0 {
            return 0.0;
        }
        (n * n - 1.0) / (3.0 * n)
    }

    /// Deviation of the sample mean from its expectation, relative to `max`.
    pub fn mean_deviation(&self) -> f64 {
        if self.config.max == 0 {
            return 0.0;
        }
        (self.samples.mean - self.expected_mean()).abs() / self.config.max as f64
    }
}
