//! Report formatting utilities for dpdpscan outputs.

use std::fmt::Write;

use serde::Serialize;

use crate::domain::ScanReport;

/// Render a scan report as plain text.
pub fn render_scan_text(report: &ScanReport) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", report.summary);
    let _ = writeln!(output, "Score: {}/100", report.score);
    let _ = writeln!(output, "Method: {}", report.scan_method);
    if report.violations.is_empty() {
        let _ = writeln!(output, "\nNo violations found.");
        return output;
    }
    let _ = writeln!(output, "\nViolations:");
    for violation in &report.violations {
        let _ = writeln!(
            output,
            "- [{}] {} ({})",
            violation.severity.as_str(),
            violation.violation_type,
            violation.file
        );
        let _ = writeln!(output, "  fix: {}", violation.fix);
    }
    output
}

/// Render any serializable report payload as JSON.
pub fn render_scan_json<T: Serialize + ?Sized>(payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}
