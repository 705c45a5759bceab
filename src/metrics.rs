//! Derivation of speedup and parallel efficiency
//!
//! For a baseline runtime `T_b` and a run with `NP` processes and runtime `T`:
//!
//! ```text
//! speedup    = T_b / T
//! efficiency = speedup / NP
//! ```
//!
//! Values are reported as measured. A non-monotonic speedup curve is kept
//! as-is; nothing is clamped.

use crate::error::{MetricsError, Result};
use crate::repository::MetricsRepository;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which run speedup is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "BaselineRepr")]
pub enum Baseline {
    /// The run with the smallest observed process count
    #[default]
    Smallest,
    /// A specific process count that must be present
    Fixed(u32),
}

impl Baseline {
    /// Resolve the policy against the repository to a concrete process count
    pub fn resolve(&self, repo: &MetricsRepository) -> Result<u32> {
        match *self {
            Baseline::Smallest => repo.min_process_count(),
            Baseline::Fixed(np) => {
                if repo.is_empty() {
                    return Err(MetricsError::EmptyRepository);
                }
                if repo.contains(np) {
                    Ok(np)
                } else {
                    Err(MetricsError::MissingBaseline {
                        process_count: np,
                        available: repo.process_counts(),
                    })
                }
            }
        }
    }
}

impl fmt::Display for Baseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Baseline::Smallest => write!(f, "min"),
            Baseline::Fixed(np) => write!(f, "{}", np),
        }
    }
}

impl FromStr for Baseline {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "min" | "smallest" => Ok(Baseline::Smallest),
            _ => match s.parse::<u32>() {
                Ok(0) => Err("baseline process count must be greater than zero".to_string()),
                Ok(np) => Ok(Baseline::Fixed(np)),
                Err(_) => Err(format!(
                    "invalid baseline '{}' (expected 'min' or a process count)",
                    s
                )),
            },
        }
    }
}

/// Config-file form: `baseline = "min"` or `baseline = 2`
#[derive(Deserialize)]
#[serde(untagged)]
enum BaselineRepr {
    Fixed(u32),
    Named(String),
}

impl TryFrom<BaselineRepr> for Baseline {
    type Error = String;

    fn try_from(repr: BaselineRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            BaselineRepr::Fixed(0) => {
                Err("baseline process count must be greater than zero".to_string())
            }
            BaselineRepr::Fixed(np) => Ok(Baseline::Fixed(np)),
            BaselineRepr::Named(s) => s.parse(),
        }
    }
}

/// One row of the derived metrics table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsRow {
    pub process_count: u32,
    pub runtime_seconds: f64,
    pub speedup: f64,
    pub efficiency: f64,
}

impl MetricsRow {
    /// Linear-scaling reference: speedup equal to the process count
    pub fn ideal_speedup(&self) -> f64 {
        f64::from(self.process_count)
    }
}

/// Derived metrics, ascending by process count. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsTable {
    baseline_process_count: u32,
    baseline_runtime: f64,
    rows: Vec<MetricsRow>,
}

impl MetricsTable {
    pub fn baseline_process_count(&self) -> u32 {
        self.baseline_process_count
    }

    pub fn baseline_runtime(&self) -> f64 {
        self.baseline_runtime
    }

    pub fn rows(&self) -> &[MetricsRow] {
        &self.rows
    }

    pub fn row(&self, process_count: u32) -> Option<&MetricsRow> {
        self.rows
            .binary_search_by_key(&process_count, |r| r.process_count)
            .ok()
            .map(|idx| &self.rows[idx])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Compute speedup and efficiency for every record against `baseline`.
///
/// Fails with [`MetricsError::EmptyRepository`] when there is nothing to
/// derive, and with [`MetricsError::MissingBaseline`] when a fixed baseline
/// process count was never measured. There is no fallback from a fixed
/// baseline to the smallest one.
pub fn derive(repo: &MetricsRepository, baseline: Baseline) -> Result<MetricsTable> {
    let baseline_process_count = baseline.resolve(repo)?;
    let baseline_runtime = repo
        .get(baseline_process_count)
        .ok_or(MetricsError::EmptyRepository)?;

    // Records hold strictly positive runtimes, so the divisions are defined.
    let rows = repo
        .records()
        .map(|record| {
            let speedup = baseline_runtime / record.runtime_seconds;
            MetricsRow {
                process_count: record.process_count,
                runtime_seconds: record.runtime_seconds,
                speedup,
                efficiency: speedup / f64::from(record.process_count),
            }
        })
        .collect();

    Ok(MetricsTable {
        baseline_process_count,
        baseline_runtime,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RuntimeRecord;

    fn repo(entries: &[(u32, f64)]) -> MetricsRepository {
        entries
            .iter()
            .map(|&(np, t)| RuntimeRecord::new(np, t).unwrap())
            .collect()
    }

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_two_run_example() {
        let table = derive(&repo(&[(2, 1.0), (4, 0.3)]), Baseline::Smallest).unwrap();
        assert_eq!(table.baseline_process_count(), 2);
        assert_eq!(table.len(), 2);

        let np2 = table.row(2).unwrap();
        assert_close(np2.speedup, 1.0, 1e-12);
        assert_close(np2.efficiency, 0.5, 1e-12);

        let np4 = table.row(4).unwrap();
        assert_close(np4.speedup, 3.333, 1e-3);
        assert_close(np4.efficiency, 0.833, 1e-3);
    }

    #[test]
    fn test_fixed_baseline() {
        let table = derive(&repo(&[(1, 4.0), (2, 2.0), (4, 1.0)]), Baseline::Fixed(2)).unwrap();
        assert_eq!(table.baseline_process_count(), 2);
        assert_close(table.baseline_runtime(), 2.0, 1e-12);
        assert_close(table.row(1).unwrap().speedup, 0.5, 1e-12);
        assert_close(table.row(4).unwrap().speedup, 2.0, 1e-12);
        assert_close(table.row(4).unwrap().efficiency, 0.5, 1e-12);
    }

    #[test]
    fn test_fixed_baseline_missing_is_fatal() {
        let err = derive(&repo(&[(1, 4.0), (4, 1.0)]), Baseline::Fixed(2)).unwrap_err();
        match err {
            MetricsError::MissingBaseline {
                process_count,
                available,
            } => {
                assert_eq!(process_count, 2);
                assert_eq!(available, vec![1, 4]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_repository() {
        let empty = MetricsRepository::new();
        assert!(matches!(
            derive(&empty, Baseline::Smallest),
            Err(MetricsError::EmptyRepository)
        ));
        assert!(matches!(
            derive(&empty, Baseline::Fixed(2)),
            Err(MetricsError::EmptyRepository)
        ));
    }

    #[test]
    fn test_non_monotonic_speedup_kept() {
        let table = derive(&repo(&[(2, 1.0), (4, 0.5), (8, 0.8)]), Baseline::Smallest).unwrap();
        assert!(table.row(8).unwrap().speedup < table.row(4).unwrap().speedup);
        assert_close(table.row(8).unwrap().speedup, 1.25, 1e-12);
    }

    #[test]
    fn test_rows_sorted_ascending() {
        let table = derive(&repo(&[(16, 0.1), (1, 2.0), (4, 0.6)]), Baseline::Smallest).unwrap();
        let nps: Vec<u32> = table.rows().iter().map(|r| r.process_count).collect();
        assert_eq!(nps, vec![1, 4, 16]);
    }

    #[test]
    fn test_ideal_speedup_is_identity() {
        let table = derive(&repo(&[(2, 1.0), (8, 0.3)]), Baseline::Smallest).unwrap();
        assert_eq!(table.row(8).unwrap().ideal_speedup(), 8.0);
    }

    #[test]
    fn test_baseline_from_str() {
        assert_eq!("min".parse::<Baseline>().unwrap(), Baseline::Smallest);
        assert_eq!("Smallest".parse::<Baseline>().unwrap(), Baseline::Smallest);
        assert_eq!("2".parse::<Baseline>().unwrap(), Baseline::Fixed(2));
        assert!("0".parse::<Baseline>().is_err());
        assert!("two".parse::<Baseline>().is_err());
    }

    #[test]
    fn test_baseline_display_round_trip() {
        for b in [Baseline::Smallest, Baseline::Fixed(4)] {
            assert_eq!(b.to_string().parse::<Baseline>().unwrap(), b);
        }
    }
}
