use async_trait::async_trait;

use crate::domain::CommitRecord;
use crate::error::AppResult;

/// Access to the version-control tool at the pipeline boundary.
#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Raw unified diff of the currently staged changes. An empty string
    /// means nothing is staged; the orchestrator turns that into
    /// `AppError::EmptyDiff`.
    async fn staged_diff(&self) -> AppResult<String>;

    /// Commits the staged changes with the record's subject and body as
    /// separate message segments.
    async fn commit(&self, record: &CommitRecord) -> AppResult<()>;
}
