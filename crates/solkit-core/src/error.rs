//! Error taxonomy for solkit invocations.
//!
//! Only failures that leave no meaningful partial result live here. Tool
//! start failures, timeouts, non-zero exits and unparseable output are all
//! recorded inside the returned result objects instead.

/// Errors that abort an invocation outright.
#[derive(Debug, thiserror::Error)]
pub enum ToolkitError {
    /// Creating the workspace directory or writing the staged source failed.
    #[error("workspace error: {0}")]
    Workspace(#[from] std::io::Error),

    /// The requested filename has no usable single path segment.
    #[error("invalid filename: {0:?}")]
    InvalidFilename(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to parse configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for solkit operations.
pub type Result<T> = std::result::Result<T, ToolkitError>;
