use async_trait::async_trait;

use crate::error::AppResult;

/// Generative backend that proposes a commit message for a diff summary.
///
/// Implementations return the raw reply text; parsing and validation are
/// the normalizer's job so a bad reply can be surfaced verbatim.
#[async_trait]
pub trait LanguageModelService: Send + Sync {
    async fn generate_commit_message(&self, summary: &str) -> AppResult<String>;
}
