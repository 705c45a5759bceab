//! Locate → parse → store → derive
//!
//! A [`ScalingPipeline`] owns its repository, so independent runs in one
//! process never share state.

use crate::error::{ArtifactError, MetricsError, Result};
use crate::locator::{self, ArtifactPattern};
use crate::metrics::{self, Baseline, MetricsTable};
use crate::parser;
use crate::repository::{MetricsRepository, RuntimeRecord};
use std::path::PathBuf;

/// Inputs that fully determine a pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub artifact_dir: PathBuf,
    pub pattern: ArtifactPattern,
    pub baseline: Baseline,
}

impl PipelineConfig {
    pub fn new(artifact_dir: impl Into<PathBuf>) -> Self {
        Self {
            artifact_dir: artifact_dir.into(),
            pattern: ArtifactPattern::default(),
            baseline: Baseline::default(),
        }
    }

    pub fn with_baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn with_pattern(mut self, pattern: ArtifactPattern) -> Self {
        self.pattern = pattern;
        self
    }
}

/// A runtime that replaced an earlier one for the same process count
#[derive(Debug, Clone, PartialEq)]
pub struct Overwrite {
    pub process_count: u32,
    pub previous_runtime: f64,
    pub path: PathBuf,
}

/// Result of a complete run
#[derive(Debug)]
pub struct PipelineOutcome {
    pub table: MetricsTable,
    /// Artifacts that contributed nothing, with the reason
    pub skipped: Vec<ArtifactError>,
    pub overwrites: Vec<Overwrite>,
}

#[derive(Debug)]
pub struct ScalingPipeline {
    config: PipelineConfig,
    repository: MetricsRepository,
    skipped: Vec<ArtifactError>,
    overwrites: Vec<Overwrite>,
}

impl ScalingPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            repository: MetricsRepository::new(),
            skipped: Vec::new(),
            overwrites: Vec::new(),
        }
    }

    pub fn repository(&self) -> &MetricsRepository {
        &self.repository
    }

    pub fn skipped(&self) -> &[ArtifactError] {
        &self.skipped
    }

    pub fn overwrites(&self) -> &[Overwrite] {
        &self.overwrites
    }

    /// Scan the artifact directory and load every usable runtime.
    ///
    /// Per-file problems are logged and recorded in [`skipped`](Self::skipped).
    /// Fails only when the directory cannot be read or holds no file matching
    /// the pattern. Returns the number of records now in the repository.
    ///
    /// Every call starts from an empty repository, so collecting again
    /// reflects the directory as it is now rather than piling up records.
    pub fn collect(&mut self) -> Result<usize> {
        self.repository = MetricsRepository::new();
        self.skipped.clear();
        self.overwrites.clear();

        let dir = &self.config.artifact_dir;
        let located = locator::locate(dir, &self.config.pattern)?;

        if located.candidates() == 0 {
            return Err(MetricsError::NoArtifacts {
                dir: dir.clone(),
                pattern: self.config.pattern.to_string(),
            });
        }
        tracing::debug!(
            "{} candidate artifact(s) in {}",
            located.candidates(),
            dir.display()
        );

        self.skipped.extend(located.rejected);

        for artifact in located.artifacts {
            let parsed = match parser::read_runtime(&artifact.path) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!("skipping artifact: {}", e);
                    self.skipped.push(e);
                    continue;
                }
            };

            // The parser only yields positive finite runtimes and the locator
            // only non-zero process counts.
            let record = RuntimeRecord::new(artifact.process_count, parsed.runtime_seconds)?;
            tracing::debug!(
                "NP={} runtime={}s ({}:{})",
                record.process_count,
                record.runtime_seconds,
                artifact.path.display(),
                parsed.line_number
            );

            if let Some(previous_runtime) = self.repository.insert(record) {
                tracing::warn!(
                    "duplicate runtime for NP={}: {} replaces earlier value {}s",
                    record.process_count,
                    artifact.path.display(),
                    previous_runtime
                );
                self.overwrites.push(Overwrite {
                    process_count: record.process_count,
                    previous_runtime,
                    path: artifact.path,
                });
            }
        }

        tracing::info!(
            "loaded {} runtime record(s), skipped {} artifact(s)",
            self.repository.len(),
            self.skipped.len()
        );
        Ok(self.repository.len())
    }

    /// Derive the metrics table from the records collected so far
    pub fn derive(&self) -> Result<MetricsTable> {
        metrics::derive(&self.repository, self.config.baseline)
    }

    /// Collect and derive in one step
    pub fn run(mut self) -> Result<PipelineOutcome> {
        self.collect()?;
        let table = self.derive()?;
        Ok(PipelineOutcome {
            table,
            skipped: self.skipped,
            overwrites: self.overwrites,
        })
    }
}
