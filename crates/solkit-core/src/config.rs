//! Tool and workspace configuration.
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults (`solc`, `slither`, system temp dir, no timeout)
//! 2. An optional TOML file ([`ToolkitConfig::from_toml_file`])
//! 3. `SOLKIT_*` environment variables ([`ToolkitConfig::apply_env`])
//!
//! Binaries layer CLI flags on top of the result.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::request::DEFAULT_FILENAME;
use crate::error::{Result, ToolkitError};

pub const ENV_SOLC: &str = "SOLKIT_SOLC";
pub const ENV_SLITHER: &str = "SOLKIT_SLITHER";
pub const ENV_COMPILE_TIMEOUT: &str = "SOLKIT_COMPILE_TIMEOUT_SECS";
pub const ENV_AUDIT_TIMEOUT: &str = "SOLKIT_AUDIT_TIMEOUT_SECS";
pub const ENV_WORKSPACE_ROOT: &str = "SOLKIT_WORKSPACE_ROOT";

/// How to launch one external tool.
///
/// The staged filename is appended after `args`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    pub binary: String,
    pub args: Vec<String>,

    /// Kill the tool after this many seconds. `None` waits indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ToolConfig {
    pub fn new(binary: impl Into<String>, args: &[&str]) -> Self {
        Self {
            binary: binary.into(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            timeout_secs: None,
        }
    }

    /// `solc --combined-json abi,bin,metadata <file>`
    pub fn solc() -> Self {
        Self::new("solc", &["--combined-json", "abi,bin,metadata"])
    }

    /// `slither --json - <file>`
    pub fn slither() -> Self {
        Self::new("slither", &["--json", "-"])
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Full argument list for a run against `filename`.
    pub fn args_for(&self, filename: &str) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(filename.to_string());
        args
    }
}

/// Where scoped workspaces are created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Parent directory; `None` uses the system temp directory.
    pub root: Option<PathBuf>,

    /// Directory name prefix.
    pub prefix: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: None,
            prefix: "solkit-".to_string(),
        }
    }
}

/// Complete toolkit configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    pub compiler: ToolConfig,
    pub analyzer: ToolConfig,
    pub workspace: WorkspaceConfig,

    /// Filename used by binaries when the input has no name of its own.
    pub default_filename: String,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            compiler: ToolConfig::solc(),
            analyzer: ToolConfig::slither(),
            workspace: WorkspaceConfig::default(),
            default_filename: DEFAULT_FILENAME.to_string(),
        }
    }
}

impl ToolkitConfig {
    /// Parse a TOML document. Missing sections keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ToolkitError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Optional file, then environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overlay `SOLKIT_*` values looked up through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bin) = lookup(ENV_SOLC).filter(|v| !v.is_empty()) {
            self.compiler.binary = bin;
        }
        if let Some(bin) = lookup(ENV_SLITHER).filter(|v| !v.is_empty()) {
            self.analyzer.binary = bin;
        }
        if let Some(raw) = lookup(ENV_COMPILE_TIMEOUT) {
            self.compiler.timeout_secs = Some(parse_secs(ENV_COMPILE_TIMEOUT, &raw)?);
        }
        if let Some(raw) = lookup(ENV_AUDIT_TIMEOUT) {
            self.analyzer.timeout_secs = Some(parse_secs(ENV_AUDIT_TIMEOUT, &raw)?);
        }
        if let Some(root) = lookup(ENV_WORKSPACE_ROOT).filter(|v| !v.is_empty()) {
            self.workspace.root = Some(PathBuf::from(root));
        }
        Ok(())
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| ToolkitError::Config(format!("{key} must be a whole number of seconds, got {raw:?}")))
}
