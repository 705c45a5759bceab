//! Artifact discovery
//!
//! Runtime artifacts are named `<prefix><NP><suffix>`, e.g.
//! `scaling_runtime_4proc.txt`. A file that matches the prefix and suffix but
//! carries no usable process count is rejected on its own; the scan goes on.

use crate::error::{ArtifactError, MetricsError, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PREFIX: &str = "scaling_runtime_";
pub const DEFAULT_SUFFIX: &str = "proc.txt";

/// File name template: fixed prefix, process-count token, fixed suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPattern {
    pub prefix: String,
    pub suffix: String,
}

impl Default for ArtifactPattern {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

impl fmt::Display for ArtifactPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<NP>{}", self.prefix, self.suffix)
    }
}

impl ArtifactPattern {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Return the process-count token if `file_name` has the pattern's shape.
    ///
    /// This is the glob-level match (`<prefix>*<suffix>`); the token is not
    /// validated here.
    pub fn candidate_token<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        if file_name.len() < self.prefix.len() + self.suffix.len() {
            return None;
        }
        file_name
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())
    }

    /// Decode the process count embedded in a candidate file name
    pub fn decode_process_count(&self, path: &Path) -> std::result::Result<u32, ArtifactError> {
        let malformed = |reason: String| ArtifactError::MalformedFilename {
            path: path.to_path_buf(),
            reason,
        };

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| malformed("file name is not valid UTF-8".to_string()))?;
        let token = self
            .candidate_token(file_name)
            .ok_or_else(|| malformed(format!("does not match {}", self)))?;

        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed(format!("'{}' is not a positive integer", token)));
        }
        match token.parse::<u32>() {
            Ok(0) => Err(malformed("process count must be greater than zero".to_string())),
            Ok(np) => Ok(np),
            Err(e) => Err(malformed(format!("'{}': {}", token, e))),
        }
    }
}

/// A discovered artifact and the process count decoded from its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub process_count: u32,
}

/// Outcome of one directory scan
#[derive(Debug, Default)]
pub struct LocateReport {
    /// Artifacts in file-name order
    pub artifacts: Vec<Artifact>,
    /// Candidates whose name could not be decoded
    pub rejected: Vec<ArtifactError>,
}

impl LocateReport {
    /// Number of files that matched the pattern shape, decoded or not
    pub fn candidates(&self) -> usize {
        self.artifacts.len() + self.rejected.len()
    }
}

/// Scan `dir` (non-recursively) for files matching `pattern`.
///
/// Candidates are visited in file-name order so that the repository's
/// last-write-wins policy is deterministic across platforms.
pub fn locate(dir: &Path, pattern: &ArtifactPattern) -> Result<LocateReport> {
    let read_dir_err = |source| MetricsError::ReadDir {
        dir: dir.to_path_buf(),
        source,
    };

    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| pattern.candidate_token(name).is_some());
        if matches {
            candidates.push(path);
        } else {
            tracing::trace!("ignoring {}", path.display());
        }
    }
    candidates.sort();

    let mut report = LocateReport::default();
    for path in candidates {
        match pattern.decode_process_count(&path) {
            Ok(process_count) => {
                tracing::debug!("found artifact {} (NP={})", path.display(), process_count);
                report.artifacts.push(Artifact {
                    path,
                    process_count,
                });
            }
            Err(e) => {
                tracing::warn!("skipping artifact: {}", e);
                report.rejected.push(e);
            }
        }
    }

    Ok(report)
}
