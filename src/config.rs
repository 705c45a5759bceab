//! Run configuration (mpiscale.toml)
//!
//! Every key is optional; a missing file means built-in defaults.
//!
//! ```toml
//! artifact_dir = "performance"
//! output_dir = "reports/figures"
//! prefix = "scaling_runtime_"
//! suffix = "proc.txt"
//! baseline = 2          # or "min"
//! charts = true
//! format = "text"       # text | json | csv
//! ```
//!
//! Relative paths are taken relative to the current working directory.

use crate::cli::{Cli, OutputFormat};
use crate::locator::{ArtifactPattern, DEFAULT_PREFIX, DEFAULT_SUFFIX};
use crate::metrics::Baseline;
use crate::pipeline::PipelineConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "mpiscale.toml";

pub const DEFAULT_ARTIFACT_DIR: &str = "performance";
pub const DEFAULT_OUTPUT_DIR: &str = "reports/figures";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScalingConfig {
    /// Directory scanned for runtime artifacts
    pub artifact_dir: PathBuf,
    /// Directory charts are written to (created if absent)
    pub output_dir: PathBuf,
    pub prefix: String,
    pub suffix: String,
    pub baseline: Baseline,
    /// Render charts in addition to the text report
    pub charts: bool,
    pub format: OutputFormat,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            artifact_dir: PathBuf::from(DEFAULT_ARTIFACT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            baseline: Baseline::default(),
            charts: true,
            format: OutputFormat::default(),
        }
    }
}

impl ScalingConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    /// Resolve the effective configuration: defaults, then the config file
    /// (explicit `--config`, else `mpiscale.toml` if present), then CLI flags.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                tracing::debug!("loading {}", DEFAULT_CONFIG_FILE);
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };
        config.apply_cli(cli);
        Ok(config)
    }

    /// Overlay flags given on the command line
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(dir) = &cli.dir {
            self.artifact_dir = dir.clone();
        }
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(prefix) = &cli.prefix {
            self.prefix = prefix.clone();
        }
        if let Some(suffix) = &cli.suffix {
            self.suffix = suffix.clone();
        }
        if let Some(baseline) = cli.baseline {
            self.baseline = baseline;
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
        if cli.no_charts {
            self.charts = false;
        }
    }

    pub fn pattern(&self) -> ArtifactPattern {
        ArtifactPattern::new(self.prefix.clone(), self.suffix.clone())
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            artifact_dir: self.artifact_dir.clone(),
            pattern: self.pattern(),
            baseline: self.baseline,
        }
    }
}
