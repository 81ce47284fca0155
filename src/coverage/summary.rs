//! Summary outcomes for an LCOV report
//!
//! Every outcome is a normal result with its own one-line message; nothing here
//! fails the caller.

use std::fmt;
use std::io;
use std::path::Path;

use super::{scan_lcov, CoverageTotals};

/// Default location of the LCOV report
pub const DEFAULT_LCOV_PATH: &str = "coverage/lcov.info";

/// Outcome of summarizing a report
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    /// Report file is absent
    NotFound,
    /// Report exists but could not be read
    Unreadable(String),
    /// Report has no instrumented lines
    NoLines,
    /// Report has at least one instrumented line
    Totals(CoverageTotals),
}

impl Summary {
    /// Scan the report at `path` and classify the result
    pub fn from_path(path: &Path) -> Self {
        match scan_lcov(path) {
            Ok(totals) => Self::from_totals(totals),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Summary::NotFound,
            Err(e) => Summary::Unreadable(e.to_string()),
        }
    }

    pub fn from_totals(totals: CoverageTotals) -> Self {
        if totals.lines_found == 0 {
            Summary::NoLines
        } else {
            Summary::Totals(totals)
        }
    }

    pub fn totals(&self) -> Option<CoverageTotals> {
        match self {
            Summary::Totals(totals) => Some(*totals),
            _ => None,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::NotFound | Summary::Unreadable(_) => write!(f, "lcov.info not found"),
            Summary::NoLines => write!(f, "No lines found in lcov.info"),
            Summary::Totals(totals) => write!(
                f,
                "LF: {}, LH: {}, Coverage: {}%",
                totals.lines_found,
                totals.lines_hit,
                format_percentage(totals.rounded_percentage().unwrap_or(0.0))
            ),
        }
    }
}

/// Shortest round-trip form that keeps a fractional digit: `80.0`, `66.67`.
pub fn format_percentage(value: f64) -> String {
    format!("{:?}", value)
}
