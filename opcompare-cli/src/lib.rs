#![warn(missing_docs)]
//! opcompare CLI Library
//!
//! Command-line front end: reads two benchmark documents, compares their
//! first backends against the roofline model and writes the merged report.
//!
//! # Example
//!
//! ```text
//! opcompare vulkan.json rocm.json comparison.json
//! opcompare --format human --candidate-label ROCm0-nightly a.json b.json report.txt
//! ```

mod config;

pub use config::*;

use anyhow::Context;
use clap::Parser;
use opcompare_report::{
    BenchmarkDocument, CompareOptions, OutputFormat, compare_documents, format_human_output,
    generate_json_report,
};
use std::path::{Path, PathBuf};

/// opcompare CLI arguments
#[derive(Parser, Debug)]
#[command(name = "opcompare")]
#[command(
    author,
    version,
    about = "Compare two backend benchmark result files against a roofline model"
)]
pub struct Cli {
    /// First benchmark document (baseline)
    pub json_file1: PathBuf,

    /// Second benchmark document (candidate)
    pub json_file2: PathBuf,

    /// Where to write the comparison report
    pub output_file: PathBuf,

    /// Configuration file (defaults to the nearest opcompare.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format: json, human
    #[arg(long)]
    pub format: Option<String>,

    /// Label for the baseline backend (defaults to its backend name)
    #[arg(long)]
    pub baseline_label: Option<String>,

    /// Label for the candidate backend (defaults to its backend name)
    #[arg(long)]
    pub candidate_label: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run the opcompare CLI with the process arguments.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the opcompare CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => OpcompareConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => OpcompareConfig::discover()?.unwrap_or_default(),
    };

    compare_files(&cli, &config)?;
    println!("Report written to: {}", cli.output_file.display());

    Ok(())
}

/// Compare the two input files and write the report, CLI flags taking
/// precedence over the configuration file.
pub fn compare_files(cli: &Cli, config: &OpcompareConfig) -> anyhow::Result<()> {
    let format = cli
        .format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse::<OutputFormat>()
        .map_err(anyhow::Error::msg)?;

    let options = CompareOptions {
        baseline_label: cli
            .baseline_label
            .clone()
            .or_else(|| config.labels.baseline.clone()),
        candidate_label: cli
            .candidate_label
            .clone()
            .or_else(|| config.labels.candidate.clone()),
        hardware: config.hardware,
    };

    let baseline = load_document(&cli.json_file1)?;
    let candidate = load_document(&cli.json_file2)?;

    let (table, summary) = compare_documents(&baseline, &candidate, &options)?;
    if !summary.failures.is_empty() {
        tracing::warn!(
            "{} of {} compared entries could not be fully annotated",
            summary.failures.len(),
            summary.compared
        );
    }

    let output = match format {
        OutputFormat::Json => generate_json_report(&table, config.output.indent)?,
        OutputFormat::Human => format_human_output(&table),
    };

    std::fs::write(&cli.output_file, output)
        .with_context(|| format!("failed to write {}", cli.output_file.display()))?;

    Ok(())
}

fn load_document(path: &Path) -> anyhow::Result<BenchmarkDocument> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let document = BenchmarkDocument::from_json(&json)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(document)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "opcompare=debug"
    } else {
        "opcompare=info"
    };
    // A subscriber may already be installed when embedded in another binary
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
