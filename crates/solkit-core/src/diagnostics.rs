//! Line-level classification of tool diagnostics.
//!
//! This is a substring heuristic over stderr, not a grammar. A line is an
//! error if it contains `Error:`, else a warning if it contains `Warning:`;
//! every other line is dropped. A line holding both markers counts as an
//! error. Diagnostics formatted differently by other tool versions are lost.

use serde::{Deserialize, Serialize};

pub const ERROR_MARKER: &str = "Error:";
pub const WARNING_MARKER: &str = "Warning:";

/// Trimmed diagnostic lines in stream order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedDiagnostics {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Partition the non-blank lines of `stderr` into errors and warnings.
pub fn classify(stderr: &str) -> ClassifiedDiagnostics {
    let mut diagnostics = ClassifiedDiagnostics::default();

    for line in stderr.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.contains(ERROR_MARKER) {
            diagnostics.errors.push(line.to_string());
        } else if line.contains(WARNING_MARKER) {
            diagnostics.warnings.push(line.to_string());
        }
    }

    diagnostics
}
