//! In-memory [`CommandRunner`] for tests and embedders.
//!
//! `ScriptedRunner` answers each command name with a canned [`ProcessOutput`]
//! and records every call, including the staged source it saw on disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::process::{CommandRunner, ProcessOutput};

/// One call observed by [`ScriptedRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub command: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub timeout: Option<Duration>,

    /// Contents of `working_dir/<last arg>` at call time, if readable.
    pub staged_source: Option<String>,
}

#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: Mutex<HashMap<String, ProcessOutput>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every run of `command` with `output`.
    pub fn respond(self, command: &str, output: ProcessOutput) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(command.to_string(), output);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of runs of `command` so far.
    pub fn call_count(&self, command: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.command == command)
            .count()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(
        &self,
        command: &str,
        args: &[String],
        working_dir: &Path,
        timeout: Option<Duration>,
    ) -> ProcessOutput {
        let staged_source = args
            .last()
            .and_then(|file| std::fs::read_to_string(working_dir.join(file)).ok());

        self.calls.lock().unwrap().push(RecordedCall {
            command: command.to_string(),
            args: args.to_vec(),
            working_dir: working_dir.to_path_buf(),
            timeout,
            staged_source,
        });

        self.responses
            .lock()
            .unwrap()
            .get(command)
            .cloned()
            .unwrap_or_else(|| {
                ProcessOutput::start_failure(format!("no scripted response for {command}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::FAILURE_EXIT_CODE;

    #[tokio::test]
    async fn test_scripted_response_and_recording() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("A.sol"), "contract A {}").unwrap();

        let runner = ScriptedRunner::new().respond("solc", ProcessOutput::new(0, "{}", ""));
        let out = runner
            .run("solc", &["A.sol".to_string()], dir.path(), None)
            .await;

        assert_eq!(out.exit_code, 0);
        assert_eq!(runner.call_count("solc"), 1);
        assert_eq!(runner.call_count("slither"), 0);
        let calls = runner.calls();
        assert_eq!(calls[0].staged_source.as_deref(), Some("contract A {}"));
    }

    #[tokio::test]
    async fn test_unscripted_command_is_start_failure() {
        let dir = tempfile::tempdir().unwrap();
        let out = ScriptedRunner::new().run("slither", &[], dir.path(), None).await;
        assert_eq!(out.exit_code, FAILURE_EXIT_CODE);
        assert!(out.stderr.contains("slither"));
    }
}
