//! Quality thresholds for generator output.
//!
//! Defines the limits a [`DistributionReport`] must stay within for
//! the generator to be considered healthy.

use super::statistics::DistributionReport;
use serde::{Deserialize, Serialize};

/// Quality thresholds for distribution reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Maximum deviation of the one-bit fraction from 0.5.
    pub max_bit_deviation: f64,
    /// Maximum bit chi-square statistic (one degree of freedom).
    pub max_bit_chi_square: f64,
    /// Maximum deviation of the sample mean, as a fraction of the bound.
    pub max_mean_deviation: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            max_bit_deviation: 0.02,  // 2% balance tolerance
            max_bit_chi_square: 10.83, // p = 0.001
            max_mean_deviation: 0.05,
        }
    }
}

impl QualityThresholds {
    /// Creates more conservative thresholds.
    pub fn conservative() -> Self {
        Self {
            max_bit_deviation: 0.01,
            max_bit_chi_square: 6.63, // p = 0.01
            max_mean_deviation: 0.02,
        }
    }

    /// Creates more permissive thresholds (for testing).
    pub fn permissive() -> Self {
        Self {
            max_bit_deviation: 0.05,
            max_bit_chi_square: 15.13, // p = 0.0001
            max_mean_deviation: 0.1,
        }
    }

    /// Checks a report against thresholds.
    pub fn check(&self, report: &DistributionReport) -> Result<(), ThresholdViolation> {
        let deviation = report.bits.deviation();
        if deviation > self.max_bit_deviation {
            return Err(ThresholdViolation::BitDeviation {
                observed: deviation,
                threshold: self.max_bit_deviation,
            });
        }

        let chi_square = report.bits.chi_square();
        if chi_square > self.max_bit_chi_square {
            return Err(ThresholdViolation::BitChiSquare {
                observed: chi_square,
                threshold: self.max_bit_chi_square,
            });
        }

        let mean_deviation = report.mean_deviation();
        if mean_deviation > self.max_mean_deviation {
            return Err(ThresholdViolation::MeanDeviation {
                observed: mean_deviation,
                threshold: self.max_mean_deviation,
            });
        }

        Ok(())
    }
}

/// Threshold violation types.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ThresholdViolation {
    #[error("bit deviation {observed:.4} exceeds threshold {threshold:.4}")]
    BitDeviation { observed: f64, threshold: f64 },

    #[error("bit chi-square {observed:.2} exceeds threshold {threshold:.2}")]
    BitChiSquare { observed: f64, threshold: f64 },

    #[error("mean deviation {observed:.4} exceeds threshold {threshold:.4}")]
    MeanDeviation { observed: f64, threshold: f64 },
}
