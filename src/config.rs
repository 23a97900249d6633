use std::env;

use crate::error::AppResult;

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub mock_git: bool,
    pub mock_llm: bool,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        Ok(Self {
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            model: env::var("COMMITGEN_MODEL")
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: env::var("COMMITGEN_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_TOKENS),
            mock_git: env_flag("COMMITGEN_MOCK_GIT"),
            mock_llm: env_flag("COMMITGEN_MOCK_LLM"),
        })
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
