//! CLI argument parsing for mpiscale
//!
//! Every flag is optional. A bare `mpiscale` reads
//! `performance/scaling_runtime_<NP>proc.txt`, prints the metrics table and
//! writes charts to `reports/figures/`.

use crate::metrics::Baseline;
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

/// Output format for the metrics report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Fixed-width text table (default)
    #[default]
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "mpiscale")]
#[command(version)]
#[command(about = "Speedup and parallel efficiency from MPI scaling runtimes", long_about = None)]
pub struct Cli {
    /// Directory containing runtime artifacts [default: performance]
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Directory charts are written to [default: reports/figures]
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Baseline run: "min" for the smallest process count, or a fixed count (e.g. 2)
    #[arg(short = 'b', long = "baseline", value_name = "min|NP")]
    pub baseline: Option<Baseline>,

    /// Report format written to stdout [default: text]
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// Skip chart rendering
    #[arg(long = "no-charts")]
    pub no_charts: bool,

    /// Artifact file name prefix [default: scaling_runtime_]
    #[arg(long = "prefix", value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Artifact file name suffix [default: proc.txt]
    #[arg(long = "suffix", value_name = "SUFFIX")]
    pub suffix: Option<String>,

    /// Configuration file [default: ./mpiscale.toml if present]
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug tracing output (to stderr)
    #[arg(long = "debug")]
    pub debug: bool,
}
