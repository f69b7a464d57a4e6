//! Whitened RNG CLI
//!
//! Command-line interface for generating output and printing the
//! distribution report.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use whitened_rng::{
    analysis::DistributionReport, metrics::MetricsRegistry, FileConfig, WhitenedRng,
};

#[derive(Debug, Parser)]
#[command(
    name = "whitened-rng",
    version,
    about = "Xorshift64* generator with Von Neumann whitening"
)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed override (0 is replaced by 1).
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print Prometheus metrics after the command.
    #[arg(long)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the distribution report.
    Report {
        /// Number of bounded samples (bits drawn = 8 x count).
        #[arg(long)]
        count: Option<usize>,
        /// Exclusive upper bound for bounded samples.
        #[arg(long)]
        max: Option<u64>,
        /// Exit non-zero if the report violates the quality thresholds.
        #[arg(long)]
        check: bool,
    },
    /// Print whitened bits as a 0/1 string.
    Bits {
        #[arg(long, default_value_t = 64)]
        count: usize,
    },
    /// Print bounded samples, one per line.
    Sample {
        #[arg(long, default_value_t = whitened_rng::DEFAULT_BOUND)]
        max: u64,
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => FileConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.generator.seed = seed;
    }

    let mut rng = match WhitenedRng::from_config(&config.generator) {
        Ok(rng) => rng,
        Err(e) => {
            eprintln!("Invalid generator configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        seed = config.generator.seed,
        "Whitened RNG v{}",
        whitened_rng::VERSION
    );

    let registry = if cli.metrics {
        match MetricsRegistry::new() {
            Ok(registry) => Some(registry),
            Err(e) => {
                warn!("Metrics disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    let mut status = ExitCode::SUCCESS;

    match cli.command {
        Command::Report { count, max, check } => {
            let mut report_config = config.report.clone();
            if let Some(count) = count {
                report_config.count = count;
            }
            if let Some(max) = max {
                report_config.max = max;
            }

            let report = match DistributionReport::collect(&mut rng, &report_config) {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("Sampling failed: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            println!("{}", report);

            match config.thresholds.check(&report) {
                Ok(()) => info!("Report within quality thresholds"),
                Err(violation) => {
                    warn!(violation = %violation, "Report outside quality thresholds");
                    if check {
                        status = ExitCode::FAILURE;
                    }
                }
            }

            if let Some(registry) = &registry {
                registry.record_report(&report);
            }
        }
        Command::Bits { count } => {
            let bits: String = rng
                .generate_bits(count)
                .iter()
                .map(|&b| if b == 0 { '0' } else { '1' })
                .collect();
            println!("{}", bits);
        }
        Command::Sample { max, count } => {
            for _ in 0..count {
                match rng.generate_bounded(max) {
                    Ok(value) => println!("{}", value),
                    Err(e) => {
                        eprintln!("Sampling failed: {}", e);
                        status = ExitCode::FAILURE;
                        break;
                    }
                }
            }
        }
    }

    let stats = rng.stats();
    info!(
        words = stats.whitening.words_drawn,
        bits = stats.whitening.bits_consumed,
        rejections = stats.rejections,
        "Done"
    );

    if let Some(registry) = registry {
        registry.update(&stats);
        match registry.encode() {
            Ok(text) => print!("{}", text),
            Err(e) => warn!("Failed to encode metrics: {}", e),
        }
    }

    status
}
