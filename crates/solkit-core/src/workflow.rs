//! Compile-then-audit workflow.
//!
//! The analyzer only runs when compilation succeeded. Each step stages its
//! own workspace, so the two tool runs never share a file.

use std::time::Instant;

use tracing::Instrument;
use uuid::Uuid;

use crate::domain::{AuditStep, InvocationRequest, WorkflowResult, COMPILATION_FAILED};
use crate::error::Result;
use crate::obs;
use crate::process::CommandRunner;
use crate::toolkit::Toolkit;

impl<R: CommandRunner> Toolkit<R> {
    /// Compile `request`, then audit it if compilation succeeded.
    ///
    /// When compilation fails the audit step is `{ skipped: "Compilation failed" }`
    /// and `overall_success` is false.
    pub async fn compile_and_audit(&self, request: &InvocationRequest) -> Result<WorkflowResult> {
        let span = obs::invocation_span("compile_and_audit", Uuid::new_v4(), &request.filename);
        self.run_workflow(request).instrument(span).await
    }

    async fn run_workflow(&self, request: &InvocationRequest) -> Result<WorkflowResult> {
        let start = Instant::now();

        let compile_step = self.compile(request).await?;
        let audit_step = if compile_step.success {
            AuditStep::Completed(self.audit(request).await?)
        } else {
            obs::emit_workflow_short_circuit(compile_step.errors.len());
            AuditStep::skipped(COMPILATION_FAILED)
        };

        let result = WorkflowResult::new(compile_step, audit_step);
        obs::emit_workflow_finished(result.overall_success, start.elapsed().as_millis() as u64);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolkitConfig;
    use crate::fakes::ScriptedRunner;
    use crate::process::ProcessOutput;

    fn config_in(root: &std::path::Path) -> ToolkitConfig {
        let mut config = ToolkitConfig::default();
        config.workspace.root = Some(root.to_path_buf());
        config
    }

    #[tokio::test]
    async fn test_compile_failure_skips_audit() {
        let root = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::new()
            .respond("solc", ProcessOutput::new(1, "", "Error: Expected ';'\n"))
            .respond("slither", ProcessOutput::new(0, "{}", ""));
        let toolkit = Toolkit::with_runner(config_in(root.path()), runner);

        let result = toolkit
            .compile_and_audit(&InvocationRequest::new("contract A {"))
            .await
            .unwrap();

        assert!(!result.overall_success);
        assert_eq!(result.audit_step, AuditStep::skipped("Compilation failed"));
        assert_eq!(result.compile_step.errors, vec!["Error: Expected ';'"]);
        assert_eq!(toolkit.runner().call_count("solc"), 1);
        assert_eq!(toolkit.runner().call_count("slither"), 0);
    }

    #[tokio::test]
    async fn test_audit_failure_fails_workflow() {
        let root = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::new()
            .respond("solc", ProcessOutput::new(0, r#"{"contracts":{}}"#, ""))
            .respond("slither", ProcessOutput::new(1, "", "slither: command crashed"));
        let toolkit = Toolkit::with_runner(config_in(root.path()), runner);

        let result = toolkit
            .compile_and_audit(&InvocationRequest::new("contract A {}"))
            .await
            .unwrap();

        assert!(result.compile_step.success);
        assert!(!result.audit_step.success());
        assert!(!result.overall_success);
        assert_eq!(result.workflow_name, "compile_and_audit");
    }
}
