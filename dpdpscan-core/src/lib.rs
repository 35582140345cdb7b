#![deny(missing_docs)]
//! dpdpscan core library.
//!
//! This crate contains the domain types and heuristic analysis primitives
//! that power the dpdpscan compliance scanner.

pub mod analyzer;
pub mod blob;
pub mod domain;
pub mod error;
pub mod repo;
pub mod report;

pub use analyzer::{analyze, calculate_score, evaluate};
pub use blob::{ContentBlob, ENOUGH_CONTENT, EXCERPT_LIMIT};
pub use domain::{SCAN_METHOD, ScanReport, Severity, Violation};
pub use error::{Result, ScanError};
pub use repo::{DEFAULT_HOST, RepoRef};
pub use report::{render_scan_json, render_scan_text};
