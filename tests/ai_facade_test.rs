// SPDX-License-Identifier: MIT
// AI façade — operations against canned backends. No network involved.

use std::sync::Arc;

use async_trait::async_trait;
use nimbusd::ai::client::{ChatMessage, CompletionBackend};
use nimbusd::ai::{AiError, AiFacade, CursorPosition, PromptContext};
use nimbusd::config::AiConfig;

/// Backend that replies with a fixed string and records nothing.
struct Canned(&'static str);

#[async_trait]
impl CompletionBackend for Canned {
    async fn complete(
        &self,
        _messages: &[ChatMessage],
        _temperature: f32,
    ) -> Result<String, AiError> {
        Ok(self.0.to_string())
    }
}

/// Backend that always fails upstream.
struct Failing;

#[async_trait]
impl CompletionBackend for Failing {
    async fn complete(
        &self,
        _messages: &[ChatMessage],
        _temperature: f32,
    ) -> Result<String, AiError> {
        Err(AiError::EmptyResponse)
    }
}

/// Backend that captures the rendered user message for prompt assertions.
struct Capturing(std::sync::Mutex<Vec<String>>);

#[async_trait]
impl CompletionBackend for Capturing {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        _temperature: f32,
    ) -> Result<String, AiError> {
        let user = messages
            .iter()
            .filter(|m| m.role == "user")
            .map(|m| m.content.clone())
            .collect::<Vec<_>>()
            .join("\n");
        self.0.lock().unwrap().push(user);
        Ok("ok".to_string())
    }
}

fn facade(backend: impl CompletionBackend + 'static) -> AiFacade {
    AiFacade::with_backend(Arc::new(backend), &AiConfig::default())
}

#[tokio::test]
async fn generate_code_strips_the_fence() {
    let ai = facade(Canned("```js\nconst a = 1;\n```"));
    let code = ai.generate_code("make a const", "javascript", None).await.unwrap();
    assert_eq!(code, "const a = 1;");
}

#[tokio::test]
async fn context_aware_splits_code_and_explanation() {
    let ai = facade(Canned("```js\nCODE\n```\nEXPLANATION"));
    let result = ai
        .generate_context_aware_code("do it", "javascript", &PromptContext::default())
        .await
        .unwrap();
    assert_eq!(result.code, "CODE");
    assert_eq!(result.explanation, "EXPLANATION");
}

#[tokio::test]
async fn context_aware_fallback_is_all_code_with_placeholder() {
    let ai = facade(Canned("const a = 1;\nconst b = 2;"));
    let result = ai
        .generate_context_aware_code("do it", "javascript", &PromptContext::default())
        .await
        .unwrap();
    assert_eq!(result.code, "const a = 1;\nconst b = 2;");
    assert!(!result.explanation.is_empty());
}

#[tokio::test]
async fn suggestions_parse_failure_is_empty_not_error() {
    let ai = facade(Canned("I'm sorry, I can't produce JSON today."));
    let suggestions = ai
        .complete_suggestions(
            "let x = ",
            CursorPosition {
                line_number: 1,
                column: 9,
            },
            "javascript",
        )
        .await
        .unwrap();
    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn suggestions_parse_valid_json() {
    let ai = facade(Canned(
        r#"[{"text":"1;","description":"complete the statement"}]"#,
    ));
    let suggestions = ai
        .complete_suggestions(
            "let x = ",
            CursorPosition {
                line_number: 1,
                column: 9,
            },
            "javascript",
        )
        .await
        .unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].text, "1;");
}

#[tokio::test]
async fn every_operation_propagates_upstream_failure() {
    let ai = facade(Failing);
    let ctx = PromptContext::default();
    let cursor = CursorPosition {
        line_number: 1,
        column: 1,
    };

    assert!(ai.chat("hi", None).await.is_err());
    assert!(ai.generate_code("p", "js", None).await.is_err());
    assert!(ai.generate_context_aware_code("p", "js", &ctx).await.is_err());
    assert!(ai.explain_code("c", "js").await.is_err());
    assert!(ai.debug_code("c", "e", "js").await.is_err());
    assert!(ai.complete_suggestions("c", cursor, "js").await.is_err());
}

#[tokio::test]
async fn context_bundle_lands_in_the_user_message() {
    let backend = Arc::new(Capturing(std::sync::Mutex::new(Vec::new())));
    let ai = AiFacade::with_backend(backend.clone(), &AiConfig::default());

    let ctx = PromptContext {
        selected_code: Some("let sel = true;".to_string()),
        project_structure: Some(vec!["src/main.js".to_string()]),
        ..Default::default()
    };
    ai.generate_context_aware_code("extend this", "javascript", &ctx)
        .await
        .unwrap();

    let captured = backend.0.lock().unwrap();
    let user_msg = &captured[0];
    assert!(user_msg.contains("let sel = true;"));
    assert!(user_msg.contains("src/main.js"));
    assert!(user_msg.contains("extend this"));
}
