//! Output analysis and reporting.
//!
//! This module collects batches of generator output, computes
//! distribution statistics and renders them as a text report. These
//! are sanity checks, not proofs of randomness.

mod report;
mod statistics;
mod threshold;

pub use statistics::{BitBalance, DistributionReport, Histogram, ReportConfig, SampleSummary};
pub use threshold::{QualityThresholds, ThresholdViolation};
