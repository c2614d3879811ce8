//! Compiler output normalization.
//!
//! The exit code is authoritative: `success` is `exit_code == 0` no matter
//! what stdout holds. Unparseable stdout only adds an error message. When the
//! compiler never produced an exit status (start failure or signal), the
//! runner's reason is kept in `errors`.

use serde_json::Value;

use crate::diagnostics::classify;
use crate::domain::CompileResult;
use crate::process::{ProcessOutput, FAILURE_EXIT_CODE};

pub const PARSE_FAILURE: &str = "Failed to parse compilation output";
pub const TIMEOUT: &str = "Compilation timeout";

/// Build a [`CompileResult`] from one compiler run.
pub fn compile_result(filename: &str, output: &ProcessOutput) -> CompileResult {
    let success = output.success();
    let mut errors = Vec::new();
    let mut contracts = None;

    if output.timed_out {
        errors.push(TIMEOUT.to_string());
    } else if output.exit_code == FAILURE_EXIT_CODE {
        let reason = output.stderr.trim();
        if !reason.is_empty() {
            errors.push(reason.to_string());
        }
    }

    if success && !output.stdout.is_empty() {
        match serde_json::from_str::<Value>(&output.stdout) {
            Ok(mut combined) => {
                contracts = combined.get_mut("contracts").map(Value::take);
            }
            Err(e) => {
                tracing::debug!(event = "compile.parse_failed", error = %e);
                errors.push(PARSE_FAILURE.to_string());
            }
        }
    }

    let diagnostics = classify(&output.stderr);
    errors.extend(diagnostics.errors);

    CompileResult {
        success,
        errors,
        warnings: diagnostics.warnings,
        contracts,
        raw_output: output.stdout.clone(),
        filename: filename.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const COMBINED: &str = r#"{"contracts":{"Contract.sol:Counter":{"abi":[],"bin":"6080","metadata":"{}"}},"version":"0.8.24"}"#;

    #[test]
    fn test_success_extracts_contracts() {
        let out = ProcessOutput::new(0, COMBINED, "");
        let result = compile_result("Contract.sol", &out);

        assert!(result.success);
        assert!(result.errors.is_empty());
        assert_eq!(
            result.contracts,
            Some(json!({"Contract.sol:Counter": {"abi": [], "bin": "6080", "metadata": "{}"}}))
        );
        assert_eq!(result.raw_output, COMBINED);
        assert_eq!(result.filename, "Contract.sol");
    }

    #[test]
    fn test_unparseable_stdout_keeps_success() {
        let out = ProcessOutput::new(0, "not json", "");
        let result = compile_result("Contract.sol", &out);

        assert!(result.success);
        assert_eq!(result.errors, vec![PARSE_FAILURE]);
        assert!(result.contracts.is_none());
    }

    #[test]
    fn test_json_without_contracts_field() {
        let out = ProcessOutput::new(0, r#"{"version":"0.8.24"}"#, "");
        let result = compile_result("Contract.sol", &out);
        assert!(result.success);
        assert!(result.errors.is_empty());
        assert!(result.contracts.is_none());
    }

    #[test]
    fn test_empty_stdout_is_not_parsed() {
        let out = ProcessOutput::new(0, "", "");
        let result = compile_result("Contract.sol", &out);
        assert!(result.success);
        assert!(result.errors.is_empty());
        assert!(result.contracts.is_none());
    }

    #[test]
    fn test_whitespace_stdout_is_parsed() {
        let out = ProcessOutput::new(0, "\n", "");
        let result = compile_result("Contract.sol", &out);
        assert!(result.success);
        assert_eq!(result.errors, vec![PARSE_FAILURE]);
        assert!(result.contracts.is_none());
        assert_eq!(result.raw_output, "\n");
    }

    #[test]
    fn test_failure_ignores_stdout_json() {
        let out = ProcessOutput::new(1, COMBINED, "Error: Source file requires different compiler version\n");
        let result = compile_result("Contract.sol", &out);

        assert!(!result.success);
        assert!(result.contracts.is_none());
        assert_eq!(
            result.errors,
            vec!["Error: Source file requires different compiler version"]
        );
    }

    #[test]
    fn test_parse_error_precedes_diagnostics() {
        let out = ProcessOutput::new(0, "{truncated", "Warning: a\nDeclarationError: b\n");
        let result = compile_result("Contract.sol", &out);
        assert_eq!(result.errors, vec![PARSE_FAILURE, "DeclarationError: b"]);
        assert_eq!(result.warnings, vec!["Warning: a"]);
    }

    #[test]
    fn test_start_failure() {
        let out = ProcessOutput::start_failure("No such file or directory (os error 2)");
        let result = compile_result("Contract.sol", &out);
        assert!(!result.success);
        assert_eq!(result.errors, vec!["No such file or directory (os error 2)"]);
        assert!(result.warnings.is_empty());
        assert!(result.raw_output.is_empty());
    }

    #[test]
    fn test_killed_compiler_keeps_stderr_reason() {
        let out = ProcessOutput::new(FAILURE_EXIT_CODE, "", "  killed by signal 9\n");
        let result = compile_result("Contract.sol", &out);
        assert!(!result.success);
        assert_eq!(result.errors, vec!["killed by signal 9"]);
    }

    #[test]
    fn test_ordinary_failure_keeps_classified_errors_only() {
        let out = ProcessOutput::new(1, "", "Contract.sol:1:1: ParserError: x\nnote: unrelated\n");
        let result = compile_result("Contract.sol", &out);
        assert_eq!(result.errors, vec!["Contract.sol:1:1: ParserError: x"]);
    }

    #[test]
    fn test_timeout_recorded() {
        let out = ProcessOutput::timeout("solc", std::time::Duration::from_secs(30));
        let result = compile_result("Contract.sol", &out);
        assert!(!result.success);
        assert_eq!(out.exit_code, FAILURE_EXIT_CODE);
        assert_eq!(result.errors, vec![TIMEOUT]);
    }
}
