// SPDX-License-Identifier: MIT
// Chat-completion wire client (OpenAI-compatible API).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AiError;
use crate::config::AiConfig;

// ─── Wire types ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

// ─── Backend seam ─────────────────────────────────────────────────────────────

/// One chat-completion round trip. The façade depends on this trait rather
/// than on a concrete HTTP client so tests can substitute canned responses.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send the message list and return the raw assistant text.
    async fn complete(&self, messages: &[ChatMessage], temperature: f32)
        -> Result<String, AiError>;
}

// ─── HTTP implementation ──────────────────────────────────────────────────────

/// Real backend: `POST {base}/chat/completions` with bearer auth.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    timeout_secs: u64,
}

impl OpenAiClient {
    pub fn new(cfg: &AiConfig) -> Self {
        // Timeout is set per-client: the completion call is the only outbound
        // request this daemon makes.
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(cfg.timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            http,
            api_base_url: cfg.api_base_url.clone(),
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
            max_tokens: cfg.max_tokens,
            timeout_secs: cfg.timeout_secs,
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, AiError> {
        let url = format!("{}/chat/completions", self.api_base_url);
        let body = ChatRequest {
            model: &self.model,
            messages,
            temperature,
            max_tokens: self.max_tokens,
        };

        debug!(model = %self.model, temperature, "completion request");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout(self.timeout_secs)
                } else {
                    AiError::Request(e)
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AiError::Status(status.as_u16()));
        }

        let parsed: ChatResponse = resp.json().await.map_err(AiError::Request)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(AiError::EmptyResponse);
        }
        Ok(content)
    }
}
