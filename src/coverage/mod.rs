//! Coverage module
//!
//! Provides:
//! - LCOV token scanning
//! - Summary outcomes for the `summary` command
//! - Percentage math shared with the dashboard

mod lcov;
mod summary;

pub use lcov::*;
pub use summary::*;

/// Aggregate line totals summed over a whole report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoverageTotals {
    pub lines_found: u64,
    pub lines_hit: u64,
}

impl CoverageTotals {
    /// Line coverage in percent, or `None` when nothing was instrumented.
    ///
    /// `lines_hit` is not checked against `lines_found`, so a malformed
    /// report can produce values above 100.
    pub fn percentage(&self) -> Option<f64> {
        if self.lines_found == 0 {
            return None;
        }
        Some((self.lines_hit as f64 / self.lines_found as f64) * 100.0)
    }

    /// Percentage rounded to two decimals
    pub fn rounded_percentage(&self) -> Option<f64> {
        self.percentage().map(round2)
    }
}

/// Round to two decimal places, halves away from zero.
///
/// Exact ties round up in magnitude: 0.125 becomes 0.13, not the
/// half-to-even 0.12.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
