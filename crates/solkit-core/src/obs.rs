//! Structured lifecycle events for tool invocations.
//!
//! Every event carries an `event` field (`invocation.started`,
//! `invocation.finished`, `workflow.short_circuit`, ...) so log pipelines can
//! filter on it. Verbosity follows `SOLKIT_LOG`; see [`crate::telemetry`].

use tracing::{info, Span};
use uuid::Uuid;

/// Span tagging everything inside one invocation with its id.
pub fn invocation_span(operation: &'static str, invocation_id: Uuid, filename: &str) -> Span {
    tracing::info_span!(
        "solkit.invocation",
        operation = operation,
        invocation_id = %invocation_id,
        filename = %filename,
    )
}

pub fn emit_invocation_started(tool: &str, source_bytes: usize) {
    info!(event = "invocation.started", tool = %tool, source_bytes = source_bytes);
}

pub fn emit_invocation_finished(tool: &str, exit_code: i32, success: bool, duration_ms: u64) {
    info!(
        event = "invocation.finished",
        tool = %tool,
        exit_code = exit_code,
        success = success,
        duration_ms = duration_ms,
    );
}

/// Compilation failed, so the analyzer was not run.
pub fn emit_workflow_short_circuit(error_count: usize) {
    info!(event = "workflow.short_circuit", compile_errors = error_count);
}

pub fn emit_workflow_finished(overall_success: bool, duration_ms: u64) {
    info!(
        event = "workflow.finished",
        overall_success = overall_success,
        duration_ms = duration_ms,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_span_enter() {
        let _span = invocation_span("compile", Uuid::new_v4(), "Contract.sol").entered();
        emit_invocation_started("solc", 12);
    }
}
