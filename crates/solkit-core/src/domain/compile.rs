//! Normalized compiler result.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of one compiler invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileResult {
    /// Exactly `exit_code == 0`.
    pub success: bool,

    /// Parse failure message first, then `Error:` lines from stderr.
    pub errors: Vec<String>,

    /// `Warning:` lines from stderr.
    pub warnings: Vec<String>,

    /// The `contracts` object of the combined JSON, when the compiler
    /// succeeded and its stdout parsed.
    pub contracts: Option<Value>,

    /// Compiler stdout, untouched.
    pub raw_output: String,

    /// Name the source was staged under.
    pub filename: String,
}

impl CompileResult {
    /// Number of compiled contracts, zero when none were extracted.
    pub fn contract_count(&self) -> usize {
        self.contracts
            .as_ref()
            .and_then(Value::as_object)
            .map(|m| m.len())
            .unwrap_or(0)
    }
}
