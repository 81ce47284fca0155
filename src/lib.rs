//! covdash - coverage summary and quality-trend dashboard
//!
//! A small library behind the `covdash` CLI:
//! - LCOV token scanning with one-line summaries
//! - Tolerant JSON coverage history with snapshot recording
//! - Static HTML dashboard with a coverage-over-time line chart

pub mod config;
pub mod coverage;
pub mod history;
pub mod report;

pub use config::Config;
pub use coverage::{scan_lcov, scan_lcov_str, CoverageTotals, Summary};
pub use history::{append_snapshot, load_history, normalize_entry, HistoryPoint, Snapshot};
pub use report::{build_html, generate_dashboard};
