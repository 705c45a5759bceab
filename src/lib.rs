//! mpiscale - parallel scaling metrics from MPI runtime measurements
//!
//! Reads `<prefix><NP><suffix>` runtime artifacts written by a scaling
//! experiment, derives speedup and parallel efficiency against a configurable
//! baseline run, and renders the result as a text/JSON/CSV report and SVG
//! charts.
//!
//! ```no_run
//! use mpiscale::metrics::Baseline;
//! use mpiscale::pipeline::{PipelineConfig, ScalingPipeline};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = PipelineConfig::new("performance").with_baseline(Baseline::Fixed(2));
//! let outcome = ScalingPipeline::new(config).run()?;
//! print!("{}", mpiscale::report::to_text(&outcome.table));
//! # Ok(())
//! # }
//! ```

pub mod charts;
pub mod cli;
pub mod config;
pub mod error;
pub mod locator;
pub mod metrics;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod repository;
