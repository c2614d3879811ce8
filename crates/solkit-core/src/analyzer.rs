//! Analyzer output normalization.
//!
//! Unlike the compiler, an analyzer signals findings through a non-zero exit,
//! so parseable stdout is the success signal. Only when stdout does not parse
//! does `success` fall back to `exit_code == 0`.

use serde_json::Value;

use crate::domain::{AuditResult, AuditSummary, Finding};
use crate::process::ProcessOutput;

pub const PARSE_FAILURE: &str = "Failed to parse Slither output";
pub const TIMEOUT: &str = "Analysis timeout";

/// Pull `results.detectors` out of an analyzer report.
pub fn extract_findings(report: &Value) -> Vec<Finding> {
    report
        .pointer("/results/detectors")
        .and_then(Value::as_array)
        .map(|detectors| detectors.iter().cloned().map(Finding).collect())
        .unwrap_or_default()
}

/// Build an [`AuditResult`] from one analyzer run.
pub fn audit_result(filename: &str, output: &ProcessOutput) -> AuditResult {
    let mut errors = Vec::new();
    let mut findings = Vec::new();
    let mut parsed = false;

    if output.timed_out {
        errors.push(TIMEOUT.to_string());
    }

    if !output.stdout.is_empty() {
        match serde_json::from_str::<Value>(&output.stdout) {
            Ok(report) => {
                findings = extract_findings(&report);
                parsed = true;
            }
            Err(e) => {
                tracing::debug!(event = "audit.parse_failed", error = %e);
                errors.push(PARSE_FAILURE.to_string());
            }
        }
    }

    let stderr = output.stderr.trim();
    if !parsed && !stderr.is_empty() {
        errors.push(stderr.to_string());
    }

    AuditResult {
        success: parsed || output.success(),
        summary: AuditSummary::from_findings(&findings),
        findings,
        errors,
        raw_output: output.stdout.clone(),
        filename: filename.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(impacts: &[&str]) -> String {
        let detectors: Vec<Value> = impacts
            .iter()
            .map(|i| json!({"check": "reentrancy-eth", "impact": i, "confidence": "Medium"}))
            .collect();
        json!({"success": true, "error": null, "results": {"detectors": detectors}}).to_string()
    }

    #[test]
    fn test_parsed_report_succeeds_despite_exit_code() {
        let out = ProcessOutput::new(1, report(&["High", "High", "Low"]), "");
        let result = audit_result("Contract.sol", &out);

        assert!(result.success);
        assert_eq!(result.findings.len(), 3);
        assert_eq!(result.summary.total_findings, 3);
        assert_eq!(result.summary.severity_breakdown["High"], 2);
        assert_eq!(result.summary.severity_breakdown["Low"], 1);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_parsed_report_ignores_stderr() {
        let out = ProcessOutput::new(255, report(&[]), "INFO:Slither:Contract.sol analyzed\n");
        let result = audit_result("Contract.sol", &out);
        assert!(result.success);
        assert!(result.errors.is_empty());
        assert!(result.findings.is_empty());
    }

    #[test]
    fn test_missing_detectors_defaults_empty() {
        let out = ProcessOutput::new(0, r#"{"success":true,"results":{}}"#, "");
        let result = audit_result("Contract.sol", &out);
        assert!(result.success);
        assert!(result.findings.is_empty());
        assert_eq!(result.summary.total_findings, 0);
    }

    #[test]
    fn test_parse_failure_falls_back_to_exit_code() {
        let failed = audit_result(
            "Contract.sol",
            &ProcessOutput::new(1, "Traceback (most recent call last)", "  crytic-compile error  \n"),
        );
        assert!(!failed.success);
        assert_eq!(failed.errors, vec![PARSE_FAILURE, "crytic-compile error"]);

        let ok = audit_result("Contract.sol", &ProcessOutput::new(0, "<html>", ""));
        assert!(ok.success);
        assert_eq!(ok.errors, vec![PARSE_FAILURE]);
    }

    #[test]
    fn test_whitespace_stdout_is_a_parse_failure() {
        let out = ProcessOutput::new(0, "  \n", "");
        let result = audit_result("Contract.sol", &out);
        assert!(result.success);
        assert_eq!(result.errors, vec!["Failed to parse Slither output"]);
        assert!(result.findings.is_empty());
    }

    #[test]
    fn test_empty_stdout_appends_stderr_only() {
        let out = ProcessOutput::start_failure("No such file or directory (os error 2)");
        let result = audit_result("Contract.sol", &out);
        assert!(!result.success);
        assert_eq!(result.errors, vec!["No such file or directory (os error 2)"]);
        assert_eq!(result.summary, AuditSummary::default());
    }

    #[test]
    fn test_timeout_recorded() {
        let out = ProcessOutput::timeout("slither", std::time::Duration::from_secs(60));
        let result = audit_result("Contract.sol", &out);
        assert!(!result.success);
        assert_eq!(result.errors[0], TIMEOUT);
        assert!(result.errors[1].contains("timed out after 60s"));
    }

    #[test]
    fn test_extract_findings_ignores_non_array() {
        assert!(extract_findings(&json!({"results": {"detectors": "none"}})).is_empty());
        assert!(extract_findings(&json!([])).is_empty());
    }
}
