//! solkit core
//!
//! Runs an external Solidity compiler or analyzer against caller-supplied
//! source and turns its output into structured results:
//! - stages the source into a private temporary workspace
//! - runs the tool with both streams captured
//! - classifies stderr diagnostics and parses the tool's JSON
//! - removes the workspace on every exit path
//!
//! [`Toolkit::compile_and_audit`] chains the two, skipping the audit when
//! compilation fails.

pub mod analyzer;
pub mod compiler;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod fakes;
pub mod obs;
pub mod process;
pub mod telemetry;
pub mod toolkit;
pub mod workflow;
pub mod workspace;

pub use config::{ToolConfig, ToolkitConfig, WorkspaceConfig};
pub use diagnostics::{classify, ClassifiedDiagnostics};
pub use domain::{
    AuditResult, AuditStep, AuditSummary, CompileResult, Finding, InvocationRequest,
    WorkflowResult, DEFAULT_FILENAME,
};
pub use error::{Result, ToolkitError};
pub use process::{CommandRunner, ProcessOutput, TokioCommandRunner, FAILURE_EXIT_CODE};
pub use telemetry::init_tracing;
pub use toolkit::Toolkit;
pub use workspace::ScopedWorkspace;
