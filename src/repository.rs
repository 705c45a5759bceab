//! In-memory runtime store keyed by process count

use crate::error::{MetricsError, Result};
use std::collections::BTreeMap;

/// One measured run: process count and wall-clock runtime
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuntimeRecord {
    pub process_count: u32,
    pub runtime_seconds: f64,
}

impl RuntimeRecord {
    /// Build a record, rejecting a zero process count or a runtime that is
    /// not a positive finite number.
    pub fn new(process_count: u32, runtime_seconds: f64) -> Result<Self> {
        if process_count == 0 {
            return Err(MetricsError::InvalidRecord {
                process_count,
                reason: "process count must be greater than zero".to_string(),
            });
        }
        if !(runtime_seconds.is_finite() && runtime_seconds > 0.0) {
            return Err(MetricsError::InvalidRecord {
                process_count,
                reason: format!("runtime must be positive, got {}", runtime_seconds),
            });
        }
        Ok(Self {
            process_count,
            runtime_seconds,
        })
    }
}

/// Runtimes keyed by process count.
///
/// Process count is a unique key. Inserting a record for a key that is
/// already present replaces the old runtime (last write wins) and hands the
/// replaced value back to the caller so the overwrite can be reported.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MetricsRepository {
    runtimes: BTreeMap<u32, f64>,
}

impl MetricsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; returns the previous runtime for this key, if any
    pub fn insert(&mut self, record: RuntimeRecord) -> Option<f64> {
        self.runtimes
            .insert(record.process_count, record.runtime_seconds)
    }

    pub fn get(&self, process_count: u32) -> Option<f64> {
        self.runtimes.get(&process_count).copied()
    }

    pub fn contains(&self, process_count: u32) -> bool {
        self.runtimes.contains_key(&process_count)
    }

    /// Smallest process count on record
    pub fn min_process_count(&self) -> Result<u32> {
        self.runtimes
            .keys()
            .next()
            .copied()
            .ok_or(MetricsError::EmptyRepository)
    }

    /// All process counts, ascending
    pub fn process_counts(&self) -> Vec<u32> {
        self.runtimes.keys().copied().collect()
    }

    /// All records, ascending by process count
    pub fn records(&self) -> impl Iterator<Item = RuntimeRecord> + '_ {
        self.runtimes
            .iter()
            .map(|(&process_count, &runtime_seconds)| RuntimeRecord {
                process_count,
                runtime_seconds,
            })
    }

    pub fn len(&self) -> usize {
        self.runtimes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runtimes.is_empty()
    }
}

impl FromIterator<RuntimeRecord> for MetricsRepository {
    fn from_iter<I: IntoIterator<Item = RuntimeRecord>>(iter: I) -> Self {
        let mut repo = Self::new();
        for record in iter {
            repo.insert(record);
        }
        repo
    }
}
