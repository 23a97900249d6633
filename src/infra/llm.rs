use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::services::LanguageModelService;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Fixed instruction template; the diff summary is appended at the end.
/// The reply contract matches what the normalizer expects: a flat JSON
/// object, possibly wrapped in a markdown code fence.
const PROMPT_TEMPLATE: &str = "\
Analyze the following git diff summary of a codebase and generate a concise,
informative commit message. Focus on the intention behind the changes and
their impact on the project. Respond with a JSON object containing exactly
these fields:
- \"type\": one of [feat, fix, docs, test, refactor, chore].
- \"scope\": one word naming the most affected area, no punctuation or spaces.
- \"desc\": a concise description of 40 characters or less.
- \"body\": a detailed explanation suitable for a git commit message body.
- \"footer\": optional trailer text, empty string if none.

Respond with the JSON object only.

Git Diff Summary:
";

pub fn build_prompt(summary: &str) -> String {
    format!("{PROMPT_TEMPLATE}{summary}")
}

/// Live OpenAI chat-completions backend.
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String, max_tokens: u32) -> Self {
        Self {
            http: Client::new(),
            api_key,
            model,
            max_tokens,
        }
    }
}

#[async_trait]
impl LanguageModelService for OpenAiClient {
    async fn generate_commit_message(&self, summary: &str) -> AppResult<String> {
        info!("requesting commit message from {}", self.model);
        let request = ChatCompletionRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![ChatMessage {
                role: "system",
                content: build_prompt(summary),
            }],
        };

        let response = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|err| AppError::Generation(format!("failed to call OpenAI: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Generation(format!(
                "OpenAI responded with {status}: {body}"
            )));
        }

        let payload: ChatCompletionResponse = response.json().await.map_err(|err| {
            AppError::Generation(format!("failed to parse OpenAI response: {err}"))
        })?;

        let reply = payload
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::Generation("model returned no choices".to_string()))?;

        debug!("model reply: {reply}");
        Ok(reply)
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Offline backend returning a fixed, well-formed reply. Selected through
/// configuration so the rest of the pipeline runs unchanged.
pub struct CannedGenerator;

impl CannedGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LanguageModelService for CannedGenerator {
    async fn generate_commit_message(&self, _summary: &str) -> AppResult<String> {
        info!("serving canned commit message");
        Ok(r#"```json
{
  "type": "feat",
  "scope": "cli",
  "desc": "add interactive commit flow",
  "body": "Wire the generated message through an approval step. - prompt before committing - allow skipping edits",
  "footer": ""
}
```"#
            .to_string())
    }
}
