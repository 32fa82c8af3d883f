//! airport — run the fuel station scenario and export completion records.
//!
//! ```text
//! airport [--config station.json] [--seed 7] [--horizon 500000] [--output dir]
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`); `RUST_LOG=debug` shows
//! every plane arrival, refuel and truck call.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use des_output::{CsvWriter, OutputWriter, RecordExportObserver};
use des_station::{run_station, StationConfig, StationReport};

#[derive(Parser)]
#[command(name = "airport")]
#[command(about = "Airport fuel station discrete-event simulation")]
#[command(version)]
struct Cli {
    /// JSON file with station parameters; omitted fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the horizon, in simulated seconds
    #[arg(long)]
    horizon: Option<f64>,

    /// Directory for output files (created if missing)
    #[arg(short, long, default_value = "output/airport")]
    output: PathBuf,

    /// Write output.db instead of CSV files
    #[cfg(feature = "sqlite")]
    #[arg(long)]
    sqlite: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    // 1. Parameters: file (or defaults), then command-line overrides.
    let mut config = match &cli.config {
        Some(path) => StationConfig::from_json_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => StationConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(horizon) = cli.horizon {
        config.horizon_secs = horizon;
    }
    config.validate()?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    // 2. Output.
    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    info!(dir = %cli.output.display(), "writing output");

    // 3. Run.
    let t0 = Instant::now();
    #[cfg(feature = "sqlite")]
    let report = if cli.sqlite {
        run_with(&config, des_output::SqliteWriter::new(&cli.output)?)?
    } else {
        run_with(&config, CsvWriter::new(&cli.output)?)?
    };
    #[cfg(not(feature = "sqlite"))]
    let report = run_with(&config, CsvWriter::new(&cli.output)?)?;
    let elapsed = t0.elapsed();

    // 4. Summary.
    print_summary(&config, &report, &cli.output);
    println!("Wall time: {:.3} s", elapsed.as_secs_f64());
    Ok(())
}

fn run_with<W: OutputWriter>(config: &StationConfig, writer: W) -> Result<StationReport> {
    let mut obs = RecordExportObserver::new(writer);
    let report = run_station(config, &mut obs)?;
    if let Some(e) = obs.take_error() {
        return Err(e).context("writing output");
    }
    Ok(report)
}

fn print_summary(config: &StationConfig, report: &StationReport, output: &Path) {
    let total_fuel: f64 = report.records.iter().map(|r| r.fuel_litres).sum();
    let mean_duration = if report.records.is_empty() {
        0.0
    } else {
        report.records.iter().map(|r| r.duration).sum::<f64>() / report.records.len() as f64
    };

    println!("=== airport fuel station ===");
    println!(
        "Seed: {}  |  Horizon: {} s  |  Pumps: {}",
        config.seed, config.horizon_secs, config.pump_count
    );
    println!();
    println!("{:<22} {:>14}", "Planes arrived", report.planes_arrived);
    println!("{:<22} {:>14}", "Planes refueled", report.records.len());
    println!("{:<22} {:>14}", "Planes failed", report.failures.len());
    println!("{:<22} {:>14}", "Trucks called", report.trucks_called);
    println!("{:<22} {:>14.1}", "Fuel dispensed (L)", total_fuel);
    println!("{:<22} {:>14.1}", "Mean duration (s)", mean_duration);
    println!("{:<22} {:>14.1}", "Final level (L)", report.final_level);
    println!("{:<22} {:>14}", "Events dispatched", report.summary.events_dispatched);
    println!();
    println!("Output written to {}", output.display());
}
