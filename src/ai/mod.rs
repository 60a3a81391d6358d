// SPDX-License-Identifier: MIT
//! AI façade — stateless request/response operations over a chat-completion
//! API: chat, code generation, context-aware generation, explanation,
//! debugging, and inline completion.
//!
//! Error policy is uniform across operations: an upstream failure, timeout,
//! or empty response is always `Err(AiError)`; no operation substitutes
//! fallback prose. Callers decide what to show the user. The one exception
//! is suggestion *parsing* — a well-formed upstream reply that is not valid
//! suggestion JSON yields an empty list, not an error.

pub mod client;
pub mod parse;
pub mod prompt;

use std::sync::Arc;

use tracing::debug;

use client::{ChatMessage, CompletionBackend, OpenAiClient};
use parse::{parse_suggestions, split_code_and_explanation, strip_code_fence};
pub use parse::{CompletionResult, Suggestion};
pub use prompt::{ContextFile, CursorPosition, PromptContext};

use crate::config::AiConfig;

/// Failures of the model-completion API boundary.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("completion API returned HTTP {0}")]
    Status(u16),

    #[error("completion API returned no content")]
    EmptyResponse,

    #[error("completion request timed out after {0}s")]
    Timeout(u64),
}

/// Per-operation sampling temperatures (see `AiConfig`).
#[derive(Debug, Clone, Copy)]
struct Temperatures {
    codegen: f32,
    completion: f32,
    explain: f32,
    chat: f32,
}

pub struct AiFacade {
    backend: Arc<dyn CompletionBackend>,
    temperatures: Temperatures,
}

impl AiFacade {
    pub fn from_config(cfg: &AiConfig) -> Self {
        Self::with_backend(Arc::new(OpenAiClient::new(cfg)), cfg)
    }

    /// Construct with an explicit backend (tests inject canned responses).
    pub fn with_backend(backend: Arc<dyn CompletionBackend>, cfg: &AiConfig) -> Self {
        Self {
            backend,
            temperatures: Temperatures {
                codegen: cfg.temperature_codegen,
                completion: cfg.temperature_completion,
                explain: cfg.temperature_explain,
                chat: cfg.temperature_chat,
            },
        }
    }

    /// Free-text assistant reply for the chat panel.
    pub async fn chat(&self, message: &str, context: Option<&str>) -> Result<String, AiError> {
        let messages = [
            ChatMessage::system(prompt::chat_system()),
            ChatMessage::user(prompt::chat_user(message, context)),
        ];
        let raw = self
            .backend
            .complete(&messages, self.temperatures.chat)
            .await?;
        Ok(raw.trim().to_string())
    }

    /// Generate code for a natural-language prompt. The result is
    /// fence-stripped — callers receive bare code.
    pub async fn generate_code(
        &self,
        prompt_text: &str,
        language: &str,
        context: Option<&str>,
    ) -> Result<String, AiError> {
        let messages = [
            ChatMessage::system(prompt::codegen_system(language)),
            ChatMessage::user(prompt::codegen_user(prompt_text, context)),
        ];
        let raw = self
            .backend
            .complete(&messages, self.temperatures.codegen)
            .await?;
        Ok(strip_code_fence(&raw))
    }

    /// Generate code with the full context bundle and return the parsed
    /// `{code, explanation}` pair.
    pub async fn generate_context_aware_code(
        &self,
        prompt_text: &str,
        language: &str,
        context: &PromptContext,
    ) -> Result<CompletionResult, AiError> {
        let messages = [
            ChatMessage::system(prompt::codegen_system(language)),
            ChatMessage::user(prompt::context_aware_user(prompt_text, language, context)),
        ];
        let raw = self
            .backend
            .complete(&messages, self.temperatures.codegen)
            .await?;
        Ok(split_code_and_explanation(&raw))
    }

    /// Explain a code snippet.
    pub async fn explain_code(&self, code: &str, language: &str) -> Result<String, AiError> {
        let messages = [
            ChatMessage::system(prompt::explain_system(language)),
            ChatMessage::user(prompt::explain_user(code, language)),
        ];
        let raw = self
            .backend
            .complete(&messages, self.temperatures.explain)
            .await?;
        Ok(raw.trim().to_string())
    }

    /// Diagnose a failing snippet. The solution text may contain a corrected
    /// snippet; it is not parsed apart.
    pub async fn debug_code(
        &self,
        code: &str,
        error_text: &str,
        language: &str,
    ) -> Result<String, AiError> {
        let messages = [
            ChatMessage::system(prompt::debug_system(language)),
            ChatMessage::user(prompt::debug_user(code, error_text, language)),
        ];
        let raw = self
            .backend
            .complete(&messages, self.temperatures.codegen)
            .await?;
        Ok(raw.trim().to_string())
    }

    /// Inline completion at a cursor position. Returns 0–5 suggestions; a
    /// response the model formatted badly yields an empty list.
    pub async fn complete_suggestions(
        &self,
        code: &str,
        position: CursorPosition,
        language: &str,
    ) -> Result<Vec<Suggestion>, AiError> {
        let window = prompt::completion_window(code, position);
        let messages = [
            ChatMessage::system(prompt::completion_system(language)),
            ChatMessage::user(window),
        ];
        let raw = self
            .backend
            .complete(&messages, self.temperatures.completion)
            .await?;
        let suggestions = parse_suggestions(&raw);
        debug!(count = suggestions.len(), "completion suggestions parsed");
        Ok(suggestions)
    }
}
