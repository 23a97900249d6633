use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use log::{debug, info};
use tokio::process::Command;

use crate::domain::CommitRecord;
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

/// Live git backend, shelling out to the `git` binary.
pub struct GitCli;

impl GitCli {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn staged_diff(&self) -> AppResult<String> {
        info!("reading staged diff");
        // Zero context lines: the summarizer only cares about changes.
        let output = Command::new("git")
            .args(["diff", "--cached", "--unified=0"])
            .output()
            .await
            .map_err(|err| AppError::VersionControl(format!("failed to run git diff: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::VersionControl(format!(
                "git diff exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let diff = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("staged diff is {} bytes", diff.len());
        Ok(diff)
    }

    async fn commit(&self, record: &CommitRecord) -> AppResult<()> {
        let subject = record.subject();
        info!("committing: {subject}");

        let mut cmd = Command::new("git");
        cmd.args(["commit", "-m", &subject]);
        if !record.body.is_empty() {
            cmd.args(["-m", &record.body]);
        }
        if !record.footer.is_empty() {
            cmd.args(["-m", &record.footer]);
        }

        let status = cmd
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|err| AppError::VersionControl(format!("failed to run git commit: {err}")))?;

        if !status.success() {
            return Err(AppError::VersionControl(format!(
                "git commit exited with {status}"
            )));
        }
        Ok(())
    }
}

/// Canned diff source for dry runs and tests. Committing is a logged no-op.
pub struct FixedDiff {
    diff: String,
}

impl FixedDiff {
    pub fn new(diff: impl Into<String>) -> Self {
        Self { diff: diff.into() }
    }

    /// Loads a previously captured diff from a file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let diff = std::fs::read_to_string(path)?;
        Ok(Self { diff })
    }

    /// Small built-in sample, enough to exercise the whole pipeline.
    pub fn sample() -> Self {
        Self::new(
            "diff --git a/src/lib.rs b/src/lib.rs\n\
             --- a/src/lib.rs\n\
             +++ b/src/lib.rs\n\
             @@ -1,1 +1,2 @@\n\
             -pub fn greet() {}\n\
             +pub fn greet(name: &str) -> String {\n\
             +    format!(\"hello, {name}\")\n",
        )
    }
}

#[async_trait]
impl VersionControlService for FixedDiff {
    async fn staged_diff(&self) -> AppResult<String> {
        info!("serving fixed diff ({} bytes)", self.diff.len());
        Ok(self.diff.clone())
    }

    async fn commit(&self, record: &CommitRecord) -> AppResult<()> {
        info!("fixed diff source: skipping commit of {:?}", record.subject());
        Ok(())
    }
}
