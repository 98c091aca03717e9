#![warn(missing_docs)]
//! Uplift CLI Library
//!
//! Command-line driver for the feature rollout analysis: simulate a seeded
//! population, run Welch t-tests per metric, and write the dataset, summaries
//! and chart to disk.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     uplift_cli::run()
//! }
//! ```

mod analysis;
mod config;
mod pipeline;
mod simulate;

pub use analysis::{metric_values, run_analysis};
pub use config::*;
pub use pipeline::{
    METRICS_FILE, MIN_USERS, RunArtifacts, RunOptions, SUMMARY_CSV_FILE, SUMMARY_JSON_FILE,
    run_pipeline, write_artifact,
};
pub use simulate::{SimulationError, simulate_user_metrics};

use anyhow::Context;
use clap::{Parser, Subcommand};
use rayon::ThreadPoolBuilder;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use uplift_report::{
    OutputFormat, Report, format_general, format_summary_table, generate_json_report,
    generate_summary_csv,
};
use uplift_stats::{StudentT, TTestResult, WelchTTest};

/// Uplift CLI arguments
#[derive(Parser, Debug)]
#[command(name = "uplift")]
#[command(author, version, about = "Uplift - feature rollout impact analysis")]
pub struct Cli {
    /// Optional subcommand (Run, Init, Ttest); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file (discovered from uplift.toml if not specified)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: human, json, csv
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Number of simulated users
    #[arg(long, global = true)]
    pub users: Option<usize>,

    /// RNG seed
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Directory for the generated dataset
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Directory for summaries and the chart
    #[arg(long, global = true)]
    pub reports_dir: Option<PathBuf>,

    /// Skip rendering the PNG chart
    #[arg(long, global = true)]
    pub no_chart: bool,

    /// Number of threads for parallel analysis
    /// 0 = use all available cores (default), 1 = single-threaded
    #[arg(long, short = 'j', default_value = "0", global = true)]
    pub threads: usize,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Simulate, analyse and write all artifacts (default)
    Run,
    /// Print a default uplift.toml
    Init,
    /// Welch t-test on two comma-separated samples
    Ttest {
        /// Sample A
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        a: Vec<f64>,
        /// Sample B
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        b: Vec<f64>,
    },
}

/// Run the Uplift CLI with process arguments.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Uplift CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    let config = load_config(&cli)?;

    let format_str = cli.format.as_deref().unwrap_or(&config.output.format);
    let format: OutputFormat = format_str.parse().unwrap_or_else(|e| {
        tracing::warn!("{}; falling back to human output", e);
        OutputFormat::Human
    });

    if cli.threads > 0 {
        ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .ok();
    }

    match cli.command {
        Some(Commands::Init) => {
            print!("{}", UpliftConfig::default_toml());
        }
        Some(Commands::Ttest { ref a, ref b }) => {
            let runner = WelchTTest::with_model(StudentT::with_cache_capacity(
                config.analysis.gamma_cache_capacity,
            ));
            let result = runner.test(a, b)?;
            println!("{}", format_ttest(&result, format)?);
        }
        Some(Commands::Run) | None => {
            let options = build_run_options(&cli, &config);
            let artifacts = run_pipeline(&options)?;
            print_run_summary(&artifacts, format, config.analysis.alpha)?;
        }
    }

    Ok(())
}

/// Initialize tracing; `RUST_LOG` takes precedence over `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose { "uplift=debug" } else { "uplift=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(cli: &Cli) -> anyhow::Result<UpliftConfig> {
    match &cli.config {
        Some(path) => UpliftConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(UpliftConfig::discover().unwrap_or_default()),
    }
}

/// Merge config file values with CLI overrides (CLI wins)
pub fn build_run_options(cli: &Cli, config: &UpliftConfig) -> RunOptions {
    let mut simulation = config.simulation.clone();
    if let Some(users) = cli.users {
        simulation.users = users;
    }
    if let Some(seed) = cli.seed {
        simulation.seed = seed;
    }

    RunOptions {
        simulation,
        gamma_cache_capacity: config.analysis.gamma_cache_capacity,
        data_dir: cli
            .data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.output.data_dir)),
        reports_dir: cli
            .reports_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.output.reports_dir)),
        chart_file: config.output.chart_file.clone(),
        chart: config.chart.clone(),
        skip_chart: cli.no_chart,
    }
}

fn print_run_summary(
    artifacts: &RunArtifacts,
    format: OutputFormat,
    alpha: f64,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Human => {
            println!("Generated dataset: {}", artifacts.metrics_csv.display());
            println!("Saved summary: {}", artifacts.summary_csv.display());
            println!("Saved summary: {}", artifacts.summary_json.display());
            if let Some(chart) = &artifacts.chart {
                println!("Saved chart: {}", chart.display());
            }
            println!();
            println!("{}", format_summary_table(&artifacts.report.summary));
            println!();
            println!("{}", significance_line(&artifacts.report, alpha));
        }
        OutputFormat::Json => {
            println!("{}", generate_json_report(&artifacts.report)?);
        }
        OutputFormat::Csv => {
            print!("{}", generate_summary_csv(&artifacts.report.summary));
        }
    }
    Ok(())
}

fn significance_line(report: &Report, alpha: f64) -> String {
    let significant: Vec<&str> = report
        .summary
        .iter()
        .filter(|row| row.p_value < alpha)
        .map(|row| row.metric.as_str())
        .collect();
    if significant.is_empty() {
        format!("No metric changed significantly at alpha = {}", alpha)
    } else {
        format!(
            "Significant at alpha = {}: {}",
            alpha,
            significant.join(", ")
        )
    }
}

/// Render a single t-test result
pub fn format_ttest(result: &TTestResult, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Human => format!(
            "{:<20}{:>14.6}\n{:<20}{:>14.6}\n{:<20}{:>14}",
            "statistic",
            result.statistic,
            "degrees_of_freedom",
            result.degrees_of_freedom,
            "p_value",
            format_general(result.p_value, 6)
        ),
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
        OutputFormat::Csv => format!(
            "statistic,degrees_of_freedom,p_value\n{},{},{}",
            result.statistic, result.degrees_of_freedom, result.p_value
        ),
    })
}
