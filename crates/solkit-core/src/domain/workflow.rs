//! Composite result of the compile-then-audit workflow.

use serde::{Deserialize, Serialize};

use super::audit::AuditResult;
use super::compile::CompileResult;

/// Name reported in `WorkflowResult::workflow_name`.
pub const COMPILE_AND_AUDIT: &str = "compile_and_audit";

/// Skip reason recorded when compilation did not succeed.
pub const COMPILATION_FAILED: &str = "Compilation failed";

/// The audit half of a workflow: either a real result or a skip marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuditStep {
    Skipped { skipped: String },
    Completed(AuditResult),
}

impl AuditStep {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            skipped: reason.into(),
        }
    }

    /// A skipped step never counts as successful.
    pub fn success(&self) -> bool {
        match self {
            Self::Completed(result) => result.success,
            Self::Skipped { .. } => false,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    pub fn result(&self) -> Option<&AuditResult> {
        match self {
            Self::Completed(result) => Some(result),
            Self::Skipped { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowResult {
    pub workflow_name: String,
    pub compile_step: CompileResult,
    pub audit_step: AuditStep,

    /// `compile_step.success && audit_step.success()`.
    pub overall_success: bool,
}

impl WorkflowResult {
    pub fn new(compile_step: CompileResult, audit_step: AuditStep) -> Self {
        let overall_success = compile_step.success && audit_step.success();
        Self {
            workflow_name: COMPILE_AND_AUDIT.to_string(),
            compile_step,
            audit_step,
            overall_success,
        }
    }
}
