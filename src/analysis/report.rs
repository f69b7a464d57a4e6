//! Human-readable rendering of a [`DistributionReport`].

use std::fmt;

use super::statistics::DistributionReport;

const RULE_WIDTH: usize = 80;

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(RULE_WIDTH))
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    100.0 * part as f64 / whole as f64
}

impl fmt::Display for DistributionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "WHITENED RNG - DISTRIBUTION REPORT")?;
        writeln!(f, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;

        let bits = &self.bits;
        heading(f, "[1] BIT LEVEL")?;
        writeln!(f, "Total bits: {}", bits.total())?;
        writeln!(f, "Zeros: {} ({:.2}%)", bits.zeros, percent(bits.zeros, bits.total()))?;
        writeln!(f, "Ones:  {} ({:.2}%)", bits.ones, percent(bits.ones, bits.total()))?;
        writeln!(f, "Chi-square: {:.4} (1 degree of freedom)", bits.chi_square())?;
        writeln!(f, "Ideal: ~50.00% each")?;
        writeln!(f)?;

        let samples = &self.samples;
        heading(f, &format!("[2] BOUNDED SAMPLES (0-{})", self.config.max.saturating_sub(1)))?;
        writeln!(f, "Samples: {}", samples.count)?;
        writeln!(f, "Average: {:.2}", samples.mean)?;
        writeln!(f, "Minimum: {}", samples.min)?;
        writeln!(f, "Maximum: {}", samples.max)?;
        writeln!(f, "Ideal average: {:.2}", self.expected_mean())?;
        writeln!(f)?;

        let histogram = &self.histogram;
        let total = histogram.total();
        heading(
            f,
            &format!("[3] FREQUENCY DISTRIBUTION ({} buckets)", histogram.counts.len()),
        )?;
        for (index, &count) in histogram.counts.iter().enumerate() {
            let (start, end) = histogram.range(index);
            let share = percent(count, total);
            let bar = "#".repeat((share / 2.0) as usize);
            writeln!(f, "[{start:>5}-{end:>5}]: {bar} {share:5.2}% ({count})")?;
        }
        writeln!(f)?;
        writeln!(f, "Chi-square: {:.4}", histogram.chi_square())?;
        writeln!(
            f,
            "Ideal: ~{:.2}% per bucket",
            100.0 / histogram.counts.len().max(1) as f64
        )?;
        writeln!(f)?;

        heading(f, "[4] SUCCESSIVE SAMPLES")?;
        writeln!(
            f,
            "Average difference between consecutive samples: {:.2}",
            samples.successive_difference
        )?;
        writeln!(
            f,
            "Ideal: ~{:.2} (independent draws)",
            self.expected_successive_difference()
        )?;
        writeln!(f)?;

        heading(f, "[5] SUMMARY")?;
        writeln!(
            f,
            "Bit balance offset: {} (closer to 0 is better)",
            bits.zeros.abs_diff(bits.ones)
        )?;
        writeln!(
            f,
            "Average offset: {:.2} (closer to 0 is better)",
            (samples.mean - self.expected_mean()).abs()
        )?;
        write!(f, "{rule}")
    }
}
