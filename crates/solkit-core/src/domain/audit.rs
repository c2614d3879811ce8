//! Normalized analyzer result and findings summary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Severity bucket for findings that carry no `impact` field.
pub const UNKNOWN_IMPACT: &str = "unknown";

/// One analyzer finding, passed through as the tool emitted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Finding(pub Value);

impl Finding {
    /// The finding's `impact` field, if present and a string.
    pub fn impact(&self) -> Option<&str> {
        self.0.get("impact").and_then(Value::as_str)
    }
}

/// Findings counted per severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    pub total_findings: usize,
    pub severity_breakdown: BTreeMap<String, usize>,
}

impl AuditSummary {
    /// Count `findings` by impact; findings without one land under `"unknown"`.
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut severity_breakdown = BTreeMap::new();
        for finding in findings {
            let impact = finding.impact().unwrap_or(UNKNOWN_IMPACT);
            *severity_breakdown.entry(impact.to_string()).or_insert(0) += 1;
        }
        Self {
            total_findings: findings.len(),
            severity_breakdown,
        }
    }
}

/// Outcome of one analyzer invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    /// True when stdout parsed as JSON; otherwise `exit_code == 0`.
    pub success: bool,
    pub findings: Vec<Finding>,
    pub summary: AuditSummary,
    pub errors: Vec<String>,

    /// Analyzer stdout, untouched.
    pub raw_output: String,

    /// Name the source was staged under.
    pub filename: String,
}
