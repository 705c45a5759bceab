//! Runtime extraction from measurement artifacts
//!
//! Artifacts are written by the benchmark driver and their layout drifts, so
//! parsing is best-effort: lines are tried in order and the first one that
//! yields a positive runtime wins. Accepted line shapes:
//!
//! ```text
//! Runtime: 0.012345 seconds    # label, ':' separator, value, optional unit
//! 0.5                          # bare leading number
//! ```

use crate::error::{ArtifactError, LineError, RejectedLine};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Separates a label from its value on a labelled line
pub const SEPARATOR: char = ':';

const BOM: char = '\u{feff}';

/// Runtime found in an artifact, plus the lines skipped before it
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRuntime {
    pub runtime_seconds: f64,
    /// 1-based line the runtime was taken from
    pub line_number: usize,
    pub rejected: Vec<RejectedLine>,
}

fn leading_number(token: &str) -> Option<&str> {
    static NUMBER_RE: OnceLock<Regex> = OnceLock::new();
    // Safety: this regex literal is guaranteed to compile
    let re = NUMBER_RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").unwrap()
    });
    re.find(token).map(|m| m.as_str())
}

fn positive(value: f64) -> Result<f64, LineError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LineError::NotPositive(value))
    }
}

/// Parse one non-blank line into a runtime in seconds.
///
/// A line containing [`SEPARATOR`] contributes the numeric prefix of the
/// first token after it (`"Runtime: 0.25s"` gives 0.25). Any other line must
/// start with a token that is itself a number.
pub fn parse_line(line: &str) -> Result<f64, LineError> {
    let line = line.trim();

    if line.contains(SEPARATOR) {
        let token = line
            .split(SEPARATOR)
            .nth(1)
            .and_then(|value| value.split_whitespace().next())
            .ok_or(LineError::MissingValue)?;
        let number =
            leading_number(token).ok_or_else(|| LineError::NotANumber(token.to_string()))?;
        let value = number
            .parse::<f64>()
            .map_err(|_| LineError::NotANumber(token.to_string()))?;
        return positive(value);
    }

    let token = line
        .split_whitespace()
        .next()
        .ok_or(LineError::MissingValue)?;
    let value = token
        .parse::<f64>()
        .map_err(|_| LineError::NotANumber(token.to_string()))?;
    positive(value)
}

/// Scan artifact contents line by line, stopping at the first usable runtime.
///
/// Blank lines are skipped silently and a leading UTF-8 byte order mark is
/// ignored. Returns every rejected line when no line yields a runtime.
pub fn parse_runtime(contents: &str) -> Result<ParsedRuntime, Vec<RejectedLine>> {
    let contents = contents.strip_prefix(BOM).unwrap_or(contents);
    let mut rejected = Vec::new();

    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(runtime_seconds) => {
                return Ok(ParsedRuntime {
                    runtime_seconds,
                    line_number: idx + 1,
                    rejected,
                });
            }
            Err(error) => rejected.push(RejectedLine {
                line_number: idx + 1,
                error,
            }),
        }
    }

    Err(rejected)
}

fn log_rejected(path: &Path, rejected: &[RejectedLine]) {
    for r in rejected {
        tracing::warn!(
            "{}:{}: could not parse runtime: {}",
            path.display(),
            r.line_number,
            r.error
        );
    }
}

/// Read an artifact and extract its runtime.
///
/// The file is read in one shot and closed before parsing starts. Rejected
/// lines are logged as warnings whether or not a runtime is eventually found.
pub fn read_runtime(path: &Path) -> Result<ParsedRuntime, ArtifactError> {
    let contents = fs::read_to_string(path).map_err(|source| ArtifactError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    match parse_runtime(&contents) {
        Ok(parsed) => {
            log_rejected(path, &parsed.rejected);
            Ok(parsed)
        }
        Err(rejected) => {
            log_rejected(path, &rejected);
            Err(ArtifactError::NoRuntime {
                path: path.to_path_buf(),
                rejected,
            })
        }
    }
}
