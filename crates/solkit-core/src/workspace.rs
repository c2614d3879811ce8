//! Throwaway per-invocation directories holding one staged source file.
//!
//! Every [`ScopedWorkspace`] gets a fresh, uniquely named directory under the
//! configured root. Concurrent invocations never share a directory, which is
//! the only isolation they need. The directory is removed by
//! [`ScopedWorkspace::release`] or, on any early return or panic, by `Drop`.

use std::path::{Component, Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::config::WorkspaceConfig;
use crate::error::{Result, ToolkitError};

/// A temporary directory owning a single staged source file.
#[derive(Debug)]
pub struct ScopedWorkspace {
    dir: TempDir,
    filename: String,
    file_path: PathBuf,
}

impl ScopedWorkspace {
    /// Create a workspace and write `source_text` into `<dir>/<filename>`.
    ///
    /// Only the last normal component of `filename` is used, so the file
    /// always lands directly inside the workspace directory.
    pub fn acquire(config: &WorkspaceConfig, filename: &str, source_text: &str) -> Result<Self> {
        let filename = confine_filename(filename)?;

        let mut builder = tempfile::Builder::new();
        builder.prefix(&config.prefix);
        let dir = match &config.root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };

        let file_path = dir.path().join(&filename);
        std::fs::write(&file_path, source_text.as_bytes())?;

        debug!(
            event = "workspace.acquired",
            path = %dir.path().display(),
            filename = %filename,
            bytes = source_text.len(),
        );

        Ok(Self {
            dir,
            filename,
            file_path,
        })
    }

    /// Workspace directory; tools run with this as their working directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of the staged source.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Name of the staged source relative to [`path`](Self::path).
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Remove the directory tree. Failures are logged and swallowed.
    pub fn release(self) {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => debug!(event = "workspace.released", path = %path.display()),
            Err(e) => warn!(
                event = "workspace.release_failed",
                path = %path.display(),
                error = %e,
            ),
        }
    }
}

/// Reduce `filename` to a single path segment.
fn confine_filename(filename: &str) -> Result<String> {
    Path::new(filename)
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => name.to_str(),
            _ => None,
        })
        .last()
        .map(str::to_string)
        .ok_or_else(|| ToolkitError::InvalidFilename(filename.to_string()))
}
