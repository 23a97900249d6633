//! The diff-to-message pipeline: summarize, generate, normalize, fold.

use log::debug;

use crate::context::AppContext;
use crate::diff::summarize_diff;
use crate::domain::{BODY_WIDTH, CommitRecord};
use crate::error::{AppError, AppResult};
use crate::fold::fold_bulleted;
use crate::normalize::normalize_reply;

/// Builds a commit record from a raw unified diff.
///
/// One generation attempt per invocation; a backend failure is terminal
/// here and retry policy, if any, belongs to the caller.
pub async fn build_commit(ctx: &AppContext, raw_diff: &str) -> AppResult<CommitRecord> {
    if raw_diff.is_empty() {
        return Err(AppError::EmptyDiff);
    }

    let summary = summarize_diff(raw_diff);
    debug!("diff summary:\n{summary}");

    let reply = ctx.language_model.generate_commit_message(&summary).await?;
    let mut record = normalize_reply(&reply)?;

    record.body = fold_bulleted(&record.body, BODY_WIDTH);
    record.fit_subject();
    Ok(record)
}

/// Fetches the staged diff through the version-control service and builds
/// a commit record from it.
pub async fn build_from_staged(ctx: &AppContext) -> AppResult<CommitRecord> {
    let diff = ctx.version_control.staged_diff().await?;
    build_commit(ctx, &diff).await
}
