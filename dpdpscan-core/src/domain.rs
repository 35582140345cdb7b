//! Domain entities for dpdpscan.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Label describing how scan results are produced.
pub const SCAN_METHOD: &str = "real-time heuristic pattern analysis";

/// Severity of a compliance violation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Must be fixed immediately.
    Critical,
    /// Significant compliance gap.
    High,
    /// Worth addressing soon.
    Medium,
    /// Minor hygiene issue.
    Low,
}

impl Severity {
    /// Score deduction applied per violation of this severity.
    pub fn deduction(&self) -> i32 {
        match self {
            Severity::Critical => 25,
            Severity::High => 15,
            Severity::Medium => 8,
            Severity::Low => 2,
        }
    }

    /// Upper-case label for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }
}

/// A suspected DPDP compliance gap flagged by the rule engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Violation {
    /// Violation category name.
    #[serde(rename = "type")]
    pub violation_type: String,
    /// Where this class of issue is expected (a category label, not a real
    /// source path).
    pub file: String,
    /// Line number. Always 0; the acquisition strategy provides no
    /// line-level source mapping.
    pub line: u32,
    /// Severity of the violation.
    pub severity: Severity,
    /// Suggested remediation.
    pub fix: String,
}

/// Result of scanning a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScanReport {
    /// Compliance score, 0-100.
    pub score: u8,
    /// Violations found, truncated to at most ten entries.
    pub violations: Vec<Violation>,
    /// Human-readable scan summary.
    pub summary: String,
    /// How the scan was performed.
    pub scan_method: String,
}
