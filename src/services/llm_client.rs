use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;

pub const SYSTEM_PROMPT: &str = "You are an expert coding assistant. \
When asked to provide code, return ONLY the code block with proper syntax highlighting. \
Do not include any explanations or additional text outside the code block.
Format your response like this:
```language
// your code here
```";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request to chat completion API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("chat completion API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("could not parse chat completion response: {0}")]
    Malformed(String),

    #[error("chat completion API returned no reply")]
    EmptyReply,
}

/// One prompt in, one reply out. No history is kept between calls.
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [WireMessage<'a>; 2],
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint (Groq by default).
#[derive(Clone)]
pub struct ChatCompletionClient {
    http: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl ChatCompletionClient {
    pub fn new(config: &AppConfig) -> Result<Self, LlmError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CodeGenerator for ChatCompletionClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let body = CompletionRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: [
                WireMessage { role: "system", content: SYSTEM_PROMPT },
                WireMessage { role: "user", content: prompt },
            ],
        };

        tracing::debug!(endpoint = %self.endpoint, model = %self.model, "sending chat completion");

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(LlmError::Status { status, body });
        }

        let text = resp.text().await?;
        let parsed: CompletionResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::Malformed(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyReply)
    }
}
