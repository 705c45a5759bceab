//! Error taxonomy for the scaling metrics pipeline
//!
//! Two tiers:
//! - [`ArtifactError`]: a single artifact could not contribute a record.
//!   Logged and skipped; the scan continues.
//! - [`MetricsError`]: the pipeline cannot produce a report at all.

use std::path::PathBuf;
use thiserror::Error;

/// Why a single line of an artifact did not yield a runtime
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineError {
    #[error("no value after ':' separator")]
    MissingValue,

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("runtime must be a positive finite number, got {0}")]
    NotPositive(f64),
}

/// A line rejected by the runtime parser, with its 1-based line number
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedLine {
    pub line_number: usize,
    pub error: LineError,
}

/// Recoverable, per-file failures
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("cannot extract process count from file name {}: {reason}", .path.display())]
    MalformedFilename { path: PathBuf, reason: String },

    #[error("failed to read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no valid runtime found in {} ({} line(s) rejected)", .path.display(), .rejected.len())]
    NoRuntime {
        path: PathBuf,
        rejected: Vec<RejectedLine>,
    },
}

impl ArtifactError {
    /// Path of the artifact this error refers to
    pub fn path(&self) -> &std::path::Path {
        match self {
            ArtifactError::MalformedFilename { path, .. }
            | ArtifactError::Unreadable { path, .. }
            | ArtifactError::NoRuntime { path, .. } => path,
        }
    }
}

/// Fatal, pipeline-level failures
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("no {pattern} files found in {}", .dir.display())]
    NoArtifacts { dir: PathBuf, pattern: String },

    #[error("failed to read artifact directory {}: {source}", .dir.display())]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no runtime records available, cannot compute speedup")]
    EmptyRepository,

    #[error("baseline runtime for {process_count} processes not found (available: {available:?})")]
    MissingBaseline {
        process_count: u32,
        available: Vec<u32>,
    },

    #[error("invalid runtime record for NP={process_count}: {reason}")]
    InvalidRecord { process_count: u32, reason: String },
}

pub type Result<T> = std::result::Result<T, MetricsError>;
