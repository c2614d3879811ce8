//! External process execution with captured streams.
//!
//! [`CommandRunner::run`] never fails: a program that cannot be started, or
//! that is killed at its deadline, comes back as a [`ProcessOutput`] carrying
//! [`FAILURE_EXIT_CODE`] and the reason on stderr.

use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, warn};

/// Exit code reported when no real exit status exists (spawn failure,
/// timeout, termination by signal).
pub const FAILURE_EXIT_CODE: i32 = -1;

/// Captured result of one external process run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,

    /// The process was killed at its deadline.
    #[serde(default)]
    pub timed_out: bool,
}

impl ProcessOutput {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
            timed_out: false,
        }
    }

    /// The program never ran; `reason` becomes stderr.
    pub fn start_failure(reason: impl Into<String>) -> Self {
        Self::new(FAILURE_EXIT_CODE, String::new(), reason)
    }

    pub fn timeout(command: &str, limit: Duration) -> Self {
        Self {
            stdout: String::new(),
            stderr: format!("{} timed out after {:?}", command, limit),
            exit_code: FAILURE_EXIT_CODE,
            timed_out: true,
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs an external program to completion.
///
/// Implementations must not return early while the program is still writing:
/// both streams are drained while waiting for exit.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        command: &str,
        args: &[String],
        working_dir: &Path,
        timeout: Option<Duration>,
    ) -> ProcessOutput;
}

/// [`CommandRunner`] backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandRunner;

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(
        &self,
        command: &str,
        args: &[String],
        working_dir: &Path,
        timeout: Option<Duration>,
    ) -> ProcessOutput {
        let start = Instant::now();

        let child = Command::new(command)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) => {
                warn!(event = "process.start_failed", command = %command, error = %e);
                return ProcessOutput::start_failure(e.to_string());
            }
        };

        // Dropping the wait future on timeout kills the child (kill_on_drop).
        let waited = match timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(waited) => waited,
                Err(_) => {
                    warn!(
                        event = "process.timed_out",
                        command = %command,
                        limit_secs = limit.as_secs(),
                    );
                    return ProcessOutput::timeout(command, limit);
                }
            },
            None => child.wait_with_output().await,
        };

        let output = match waited {
            Ok(output) => output,
            Err(e) => {
                warn!(event = "process.wait_failed", command = %command, error = %e);
                return ProcessOutput::start_failure(e.to_string());
            }
        };

        let result = ProcessOutput::new(
            output.status.code().unwrap_or(FAILURE_EXIT_CODE),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );

        debug!(
            event = "process.finished",
            command = %command,
            exit_code = result.exit_code,
            duration_ms = start.elapsed().as_millis() as u64,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
        );

        result
    }
}
