//! Coverage history
//!
//! The history file is a JSON array of loosely-shaped snapshots. Reading it
//! never fails: anything unusable becomes an empty history. Writing it does.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fs;
use std::path::Path;

use crate::coverage::{round2, CoverageTotals, Summary};

/// Default location of the history file
pub const DEFAULT_HISTORY_PATH: &str = "coverage_history.json";

/// Date label used when an entry has neither `timestamp` nor `date`
pub const UNKNOWN_DATE: &str = "Unknown";

/// A history entry normalized for charting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub date: String,
    pub percentage: Number,
}

/// A snapshot appended by `covdash record`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: String,
    pub percentage: f64,
    pub lines_found: u64,
    pub lines_hit: u64,
}

impl Snapshot {
    pub fn new(totals: CoverageTotals, timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            percentage: totals.rounded_percentage().unwrap_or(0.0),
            lines_found: totals.lines_found,
            lines_hit: totals.lines_hit,
        }
    }

    /// Snapshot stamped with the local time
    pub fn now(totals: CoverageTotals) -> Self {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        Self::new(totals, timestamp)
    }
}

/// Read the raw history array
///
/// Missing, unreadable, unparsable or non-array files all yield an empty list.
pub fn load_history_values(path: &Path) -> Vec<Value> {
    let Ok(content) = fs::read_to_string(path) else {
        return Vec::new();
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Array(entries)) => entries,
        _ => Vec::new(),
    }
}

/// Read and normalize the history, preserving file order
pub fn load_history(path: &Path) -> Vec<HistoryPoint> {
    load_history_values(path).iter().map(normalize_entry).collect()
}

/// Normalize one entry; never drops or rejects it
pub fn normalize_entry(entry: &Value) -> HistoryPoint {
    let date = field(entry, "timestamp")
        .or_else(|| field(entry, "date"))
        .map(date_label)
        .unwrap_or_else(|| UNKNOWN_DATE.to_string());

    let percentage = match field(entry, "percentage") {
        Some(Value::Number(n)) => round_number(n),
        _ => Number::from(0),
    };

    HistoryPoint { date, percentage }
}

fn field<'a>(entry: &'a Value, key: &str) -> Option<&'a Value> {
    entry.get(key).filter(|v| !v.is_null())
}

fn date_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// Integers pass through untouched so `0` stays `0` in the output.
fn round_number(n: &Number) -> Number {
    if n.is_i64() || n.is_u64() {
        return n.clone();
    }
    n.as_f64()
        .and_then(|f| Number::from_f64(round2(f)))
        .unwrap_or_else(|| n.clone())
}

/// Append a snapshot to the history file and return the new entry count
///
/// Existing entries are kept as-is, including fields the dashboard ignores.
pub fn append_snapshot(path: &Path, snapshot: &Snapshot) -> Result<usize> {
    let mut entries = load_history_values(path);
    entries.push(serde_json::to_value(snapshot)?);

    let json = serde_json::to_string_pretty(&entries)?;
    fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write history file: {}", path.display()))?;

    Ok(entries.len())
}

/// Record the summarized coverage, returning the new entry count
///
/// Summaries without totals leave the history file untouched and yield `None`.
pub fn record(summary: &Summary, history_path: &Path) -> Result<Option<usize>> {
    let Some(totals) = summary.totals() else {
        return Ok(None);
    };

    append_snapshot(history_path, &Snapshot::now(totals)).map(Some)
}
