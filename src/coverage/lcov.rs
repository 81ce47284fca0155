//! LCOV token scanner
//!
//! Reports are treated as a bag of lines: `LF:` and `LH:` tokens are picked up
//! wherever they appear, without tracking `SF:`/`end_of_record` sections.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;

use super::CoverageTotals;

static LINES_FOUND: Lazy<Regex> = Lazy::new(|| Regex::new(r"LF:(\d+)").unwrap());
static LINES_HIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"LH:(\d+)").unwrap());

/// Scan an LCOV file on disk
///
/// Invalid UTF-8 is decoded lossily; only I/O failures are returned.
pub fn scan_lcov(path: &Path) -> io::Result<CoverageTotals> {
    let bytes = fs::read(path)?;
    Ok(scan_lcov_str(&String::from_utf8_lossy(&bytes)))
}

/// Sum every `LF:<n>` and `LH:<n>` token in the content
pub fn scan_lcov_str(content: &str) -> CoverageTotals {
    let mut totals = CoverageTotals::default();

    // A bare `\r` also ends a line
    for line in content.split(['\n', '\r']) {
        if let Some(count) = first_count(&LINES_FOUND, line) {
            totals.lines_found = totals.lines_found.saturating_add(count);
        }
        if let Some(count) = first_count(&LINES_HIT, line) {
            totals.lines_hit = totals.lines_hit.saturating_add(count);
        }
    }

    totals
}

// First match on the line only; digit runs that overflow u64 are ignored.
fn first_count(pattern: &Regex, line: &str) -> Option<u64> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
}
