//! Report formatting for scan results.
//!
//! Pure functions — (ScanReport, OutputFormat) → String.
//! No I/O, no side effects.

use humansize::{BINARY, format_size};
use serde::Serialize;

use crate::types::{OutputFormat, ScanReport};

/// Header line of the human report.
pub const HEADER: &str = "The following files are duplicates of eachother:";

/// Printed under the header when no group was found.
pub const NO_DUPLICATES: &str = "No duplicates found!";

/// Format a scan report for output.
pub fn format_report(report: &ScanReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(report),
        OutputFormat::Json => format_json(report),
    }
}

/// One-line summary for the log.
pub fn format_summary(report: &ScanReport) -> String {
    let duplicates: usize = report
        .groups
        .iter()
        .map(|g| g.paths.len().saturating_sub(1))
        .sum();

    format!(
        "{} duplicate groups, {} redundant files, {} recoverable, {} errors",
        report.groups.len(),
        duplicates,
        format_size(report.bytes_recoverable(), BINARY),
        report.errors.len()
    )
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(report: &ScanReport) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');

    for group in &report.groups {
        let quoted: Vec<String> = group
            .paths
            .iter()
            .map(|p| format!("\"{}\"", p.display()))
            .collect();
        out.push_str(&format!("  [{}] {}\n", group.paths.len(), quoted.join(", ")));
    }

    if report.groups.is_empty() {
        out.push_str(NO_DUPLICATES);
        out.push('\n');
    }

    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a ScanReport,
    had_errors: bool,
    bytes_recoverable: u64,
}

fn format_json(report: &ScanReport) -> String {
    let json = JsonReport {
        report,
        had_errors: report.has_errors(),
        bytes_recoverable: report.bytes_recoverable(),
    };
    let mut out = serde_json::to_string_pretty(&json).unwrap_or_else(|e| {
        // Every field is a plain struct, string, or number.
        panic!("Failed to serialize report to JSON: {}", e)
    });
    out.push('\n');
    out
}

// ============================================================================
// TESTS
// ============================================================================
