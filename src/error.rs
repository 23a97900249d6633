use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("nothing to summarize: no staged changes")]
    EmptyDiff,
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("version control error: {0}")]
    VersionControl(String),
    #[error("message generation failed: {0}")]
    Generation(String),
    #[error("malformed model reply: {reason} (raw reply: {raw})")]
    MalformedResponse { reason: String, raw: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
