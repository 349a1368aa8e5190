//! JSONL evaluation history.
//!
//! Append-only store: one compact `EvaluationRecord` per line. Listing
//! supports the same filters the lab actually uses — analyst substring
//! and stress condition.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use massbal_core::StressCondition;
use massbal_report::EvaluationRecord;

/// Filters applied when listing history
#[derive(Clone, Debug, Default)]
pub struct HistoryFilter {
    /// Case-insensitive substring match on the analyst name
    pub analyst: Option<String>,
    /// Exact match on the stress condition
    pub stress: Option<StressCondition>,
}

impl HistoryFilter {
    fn matches(&self, record: &EvaluationRecord) -> bool {
        if let Some(needle) = &self.analyst {
            let haystack = record.sample.analyst.to_ascii_lowercase();
            if !haystack.contains(&needle.to_ascii_lowercase()) {
                return false;
            }
        }
        if let Some(stress) = self.stress {
            if record.sample.stress != stress {
                return false;
            }
        }
        true
    }
}

/// Append one record to the history file, creating it if needed
pub fn append(path: &Path, record: &EvaluationRecord) -> Result<()> {
    let line = serde_json::to_string(record).context("failed to serialize history record")?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open history file {}", path.display()))?;
    writeln!(file, "{line}")
        .with_context(|| format!("failed to append to history file {}", path.display()))?;
    Ok(())
}

/// Load every record from a history file; a missing file is an empty history
pub fn load(path: &Path) -> Result<Vec<EvaluationRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read history file {}", path.display()))?;

    let mut records = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: EvaluationRecord = serde_json::from_str(line).with_context(|| {
            format!(
                "corrupt history record on line {} of {}",
                index + 1,
                path.display()
            )
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Load records matching the filter, newest first
pub fn list(path: &Path, filter: &HistoryFilter) -> Result<Vec<EvaluationRecord>> {
    let mut records: Vec<EvaluationRecord> = load(path)?
        .into_iter()
        .filter(|r| filter.matches(r))
        .collect();
    records.sort_by(|a, b| b.evaluated_at.cmp(&a.evaluated_at));
    Ok(records)
}
