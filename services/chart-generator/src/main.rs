//! OMFG chart generator.
//!
//! Generates plan view and time-series charts from per-cycle observation
//! files, reusing cached charts where allowed, and collates the contents of
//! cycle directories.

mod stopwatch;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use obs_processor::{
    collate, write_collated, CacheGate, ChartConfig, GeneratorSettings, ObsChartGenerator,
};
use omfg_common::Catalog;
use stopwatch::{format_elapsed, Stopwatch};

#[derive(Parser, Debug)]
#[command(name = "chart-generator")]
#[command(about = "Observation-minus-forecast chart generator")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Directory for generated charts
    #[arg(long, global = true, env = "OMFG_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the chart described by a JSON request file
    Generate {
        /// The JSON request file
        json_file: PathBuf,
    },
    /// Write collated.json for a cycle directory
    Collate {
        /// Directory holding one cycle's observation files
        cycle_dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = init_tracing(&args) {
        eprintln!("Failed to initialise logging: {}", err);
        return ExitCode::FAILURE;
    }

    let mut watch = Stopwatch::start();
    let result = run(&args);
    watch.mark();
    info!(
        task = %format_elapsed(watch.last_lap()),
        total = %format_elapsed(watch.total()),
        "Elapsed time"
    );

    match result {
        Ok(path) => {
            println!("[OK]{}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = ?err, "Chart generation failed");
            println!("[FAIL]{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(args: &Args) -> Result<()> {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries the [OK]/[FAIL] result line.
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if args.json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn run(args: &Args) -> Result<PathBuf> {
    let catalog = Catalog::standard();

    match &args.command {
        Command::Generate { json_file } => {
            let mut settings = GeneratorSettings::from_env();
            if let Some(dir) = &args.output_dir {
                settings.output_dir = dir.clone();
            }
            settings.validate().map_err(|e| anyhow!(e))?;

            let config = ChartConfig::load(json_file, &catalog)
                .with_context(|| format!("invalid request {}", json_file.display()))?;
            info!(
                chart_type = %config.chart_type(),
                filestem = %config.output_filestem(),
                "Resolved chart request"
            );

            let gate = CacheGate::new(ObsChartGenerator::from_settings(&settings), &settings.output_dir);
            Ok(gate.produce(&config)?)
        }
        Command::Collate { cycle_dir } => {
            let index = collate(cycle_dir, &catalog)
                .with_context(|| format!("failed to collate {}", cycle_dir.display()))?;
            Ok(write_collated(cycle_dir, &index)?)
        }
    }
}
