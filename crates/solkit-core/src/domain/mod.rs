//! Request and result types exchanged with callers.
//!
//! All types serialize with camelCase keys (`sourceText`, `rawOutput`,
//! `overallSuccess`, ...) so transports can forward them unchanged.

pub mod audit;
pub mod compile;
pub mod request;
pub mod workflow;

pub use audit::{AuditResult, AuditSummary, Finding};
pub use compile::CompileResult;
pub use request::{InvocationRequest, DEFAULT_FILENAME};
pub use workflow::{AuditStep, WorkflowResult, COMPILE_AND_AUDIT, COMPILATION_FAILED};
