//! Compiler and analyzer invocations.
//!
//! Each call stages the request into its own [`ScopedWorkspace`], runs the
//! configured tool against the staged file and normalizes the output. The
//! workspace is released before the result is returned; if the runner panics
//! the workspace's `Drop` removes it instead.

use std::time::Instant;

use tracing::Instrument;
use uuid::Uuid;

use crate::analyzer::audit_result;
use crate::compiler::compile_result;
use crate::config::{ToolConfig, ToolkitConfig};
use crate::domain::{AuditResult, CompileResult, InvocationRequest};
use crate::error::Result;
use crate::obs;
use crate::process::{CommandRunner, ProcessOutput, TokioCommandRunner};
use crate::workspace::ScopedWorkspace;

/// Entry point for compile, audit and compile-and-audit.
///
/// Holds no per-invocation state, so one `Toolkit` can serve any number of
/// concurrent invocations.
#[derive(Debug, Clone)]
pub struct Toolkit<R = TokioCommandRunner> {
    config: ToolkitConfig,
    runner: R,
}

impl Toolkit<TokioCommandRunner> {
    /// Toolkit that runs real processes.
    pub fn new(config: ToolkitConfig) -> Self {
        Self::with_runner(config, TokioCommandRunner)
    }
}

impl<R: CommandRunner> Toolkit<R> {
    pub fn with_runner(config: ToolkitConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Compile the request's source. `success` is the compiler's exit status.
    pub async fn compile(&self, request: &InvocationRequest) -> Result<CompileResult> {
        let (filename, output) = self.invoke("compile", &self.config.compiler, request).await?;
        Ok(compile_result(&filename, &output))
    }

    /// Analyze the request's source. `success` means the report parsed.
    pub async fn audit(&self, request: &InvocationRequest) -> Result<AuditResult> {
        let (filename, output) = self.invoke("audit", &self.config.analyzer, request).await?;
        Ok(audit_result(&filename, &output))
    }

    async fn invoke(
        &self,
        operation: &'static str,
        tool: &ToolConfig,
        request: &InvocationRequest,
    ) -> Result<(String, ProcessOutput)> {
        let span = obs::invocation_span(operation, Uuid::new_v4(), &request.filename);
        self.stage_and_run(tool, request).instrument(span).await
    }

    /// Stage, run, release. Returns the confined filename with the output.
    async fn stage_and_run(
        &self,
        tool: &ToolConfig,
        request: &InvocationRequest,
    ) -> Result<(String, ProcessOutput)> {
        let start = Instant::now();
        obs::emit_invocation_started(&tool.binary, request.source_text.len());

        let workspace =
            ScopedWorkspace::acquire(&self.config.workspace, &request.filename, &request.source_text)?;
        let filename = workspace.filename().to_string();

        let output = self
            .runner
            .run(
                &tool.binary,
                &tool.args_for(&filename),
                workspace.path(),
                tool.timeout(),
            )
            .await;

        workspace.release();

        obs::emit_invocation_finished(
            &tool.binary,
            output.exit_code,
            output.success(),
            start.elapsed().as_millis() as u64,
        );

        Ok((filename, output))
    }
}
