//! Metrics collection and registry.

use prometheus::{Encoder, Gauge, IntCounter, IntGauge, Registry, TextEncoder};
use thiserror::Error;

use crate::analysis::DistributionReport;
use crate::generator::GeneratorStats;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Prometheus metrics registry for generator monitoring.
pub struct MetricsRegistry {
    registry: Registry,

    // Whitening metrics
    words_drawn: IntCounter,
    bits_emitted: IntCounter,
    pairs_discarded: IntCounter,
    bits_consumed: IntCounter,
    buffered_bits: IntGauge,

    // Sampling metrics
    bounded_samples: IntCounter,
    rejections: IntCounter,

    // Report metrics
    bit_deviation: Gauge,
    bit_chi_square: Gauge,
    sample_mean: Gauge,
}

fn counter(registry: &Registry, name: &str, help: &str) -> Result<IntCounter, MetricsError> {
    let metric = IntCounter::new(name, help)?;
    registry.register(Box::new(metric.clone()))?;
    Ok(metric)
}

fn gauge(registry: &Registry, name: &str, help: &str) -> Result<Gauge, MetricsError> {
    let metric = Gauge::new(name, help)?;
    registry.register(Box::new(metric.clone()))?;
    Ok(metric)
}

/// Raises a monotonic counter to `target`; never decreases it.
fn advance(metric: &IntCounter, target: u64) {
    let current = metric.get();
    if target > current {
        metric.inc_by(target - current);
    }
}

impl MetricsRegistry {
    /// Creates a new metrics registry with all generator metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let words_drawn = counter(
            &registry,
            "whitened_rng_words_drawn_total",
            "Raw scrambler words pulled by the whitening buffer",
        )?;
        let bits_emitted = counter(
            &registry,
            "whitened_rng_bits_emitted_total",
            "Bits produced by Von Neumann whitening",
        )?;
        let pairs_discarded = counter(
            &registry,
            "whitened_rng_pairs_discarded_total",
            "Equal bit pairs dropped by whitening",
        )?;
        let bits_consumed = counter(
            &registry,
            "whitened_rng_bits_consumed_total",
            "Whitened bits handed to callers",
        )?;
        let buffered_bits = IntGauge::new(
            "whitened_rng_buffered_bits",
            "Whitened bits waiting in the buffer",
        )?;
        registry.register(Box::new(buffered_bits.clone()))?;

        let bounded_samples = counter(
            &registry,
            "whitened_rng_bounded_samples_total",
            "Accepted bounded draws",
        )?;
        let rejections = counter(
            &registry,
            "whitened_rng_rejections_total",
            "Bounded-draw candidates rejected as out of range",
        )?;

        let bit_deviation = gauge(
            &registry,
            "whitened_rng_report_bit_deviation",
            "Deviation of the one-bit fraction from 0.5 in the latest report",
        )?;
        let bit_chi_square = gauge(
            &registry,
            "whitened_rng_report_bit_chi_square",
            "Bit chi-square statistic in the latest report",
        )?;
        let sample_mean = gauge(
            &registry,
            "whitened_rng_report_sample_mean",
            "Mean bounded sample in the latest report",
        )?;

        Ok(Self {
            registry,
            words_drawn,
            bits_emitted,
            pairs_discarded,
            bits_consumed,
            buffered_bits,
            bounded_samples,
            rejections,
            bit_deviation,
            bit_chi_square,
            sample_mean,
        })
    }

    /// Updates generator metrics from a stats snapshot.
    pub fn update(&self, stats: &GeneratorStats) {
        let whitening = &stats.whitening;
        advance(&self.words_drawn, whitening.words_drawn);
        advance(&self.bits_emitted, whitening.bits_emitted);
        advance(&self.pairs_discarded, whitening.pairs_discarded);
        advance(&self.bits_consumed, whitening.bits_consumed);
        self.buffered_bits.set(stats.buffered_bits as i64);

        advance(&self.bounded_samples, stats.bounded_samples);
        advance(&self.rejections, stats.rejections);
    }

    /// Records the headline statistics of a distribution report.
    pub fn record_report(&self, report: &DistributionReport) {
        self.bit_deviation.set(report.bits.deviation());
        self.bit_chi_square.set(report.bits.chi_square());
        self.sample_mean.set(report.samples.mean);
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
