//! Caller payload for every core operation.

use serde::{Deserialize, Serialize};

/// Filename used when the caller does not supply one.
pub const DEFAULT_FILENAME: &str = "Contract.sol";

/// `{ sourceText, filename? }` as received from a transport.
///
/// `source_text` is not validated here; rejecting empty input is the
/// transport's job. `filename` is confined to a single path segment when the
/// workspace stages it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationRequest {
    pub source_text: String,

    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_filename() -> String {
    DEFAULT_FILENAME.to_string()
}

impl InvocationRequest {
    /// Request with the default filename.
    pub fn new(source_text: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            filename: default_filename(),
        }
    }

    /// Override the staged filename.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }
}
