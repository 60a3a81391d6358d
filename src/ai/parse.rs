// SPDX-License-Identifier: MIT
// Response shaping — turn raw model text into the structured fields the UI
// renders. The three-tier code/explanation split is a compatibility contract;
// existing prompts and tests depend on its exact fallback order.

use serde::{Deserialize, Serialize};

use super::prompt::MAX_SUGGESTIONS;

/// Substituted when a response carries no recognizable explanation.
const PLACEHOLDER_EXPLANATION: &str = "Generated code based on your request.";

/// Case-insensitive markers that open the explanation section of a response
/// that has no fenced code block.
const EXPLANATION_MARKERS: [&str; 3] = ["explanation:", "here's how", "how this works"];

/// The parsed two-part result of a context-aware generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionResult {
    pub code: String,
    pub explanation: String,
}

/// A single inline-completion suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub description: String,
}

// ─── Fence stripping ──────────────────────────────────────────────────────────

/// Strip one wrapping markdown code fence (with optional language label),
/// returning the inner code. Text without a fence is returned trimmed.
pub fn strip_code_fence(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(after_fence) = trimmed.strip_prefix("```") {
        // Skip the language label line if present.
        let body = if let Some(nl) = after_fence.find('\n') {
            &after_fence[nl + 1..]
        } else {
            after_fence
        };
        let stripped = if let Some(end) = body.rfind("\n```") {
            &body[..end]
        } else {
            body.strip_suffix("```").unwrap_or(body)
        };
        return stripped.trim_end().to_string();
    }
    trimmed.to_string()
}

// ─── Code / explanation split ─────────────────────────────────────────────────

/// Split a raw model response into `{code, explanation}`.
///
/// Tier (a): a fenced code block — code is the block contents (trimmed),
/// explanation is the text after the closing fence.
/// Tier (b): no fence — scan line-by-line for an explanation marker; lines
/// before it are code, the marker line and everything after are explanation.
/// Tier (c): neither — the whole response is code and the explanation is a
/// fixed placeholder. A tier-(a)/(b) split whose explanation comes out empty
/// also receives the placeholder.
pub fn split_code_and_explanation(raw: &str) -> CompletionResult {
    let trimmed = raw.trim();

    if let Some((code, after_block)) = extract_fenced_block(trimmed) {
        let explanation = after_block.trim();
        return CompletionResult {
            code: code.trim().to_string(),
            explanation: if explanation.is_empty() {
                PLACEHOLDER_EXPLANATION.to_string()
            } else {
                explanation.to_string()
            },
        };
    }

    let mut code_lines: Vec<&str> = Vec::new();
    let mut explanation_lines: Vec<&str> = Vec::new();
    let mut in_explanation = false;
    for line in trimmed.lines() {
        if !in_explanation {
            let lower = line.to_lowercase();
            if EXPLANATION_MARKERS.iter().any(|m| lower.contains(m)) {
                in_explanation = true;
            }
        }
        if in_explanation {
            explanation_lines.push(line);
        } else {
            code_lines.push(line);
        }
    }

    if explanation_lines.is_empty() {
        return CompletionResult {
            code: trimmed.to_string(),
            explanation: PLACEHOLDER_EXPLANATION.to_string(),
        };
    }

    let code = code_lines.join("\n").trim().to_string();
    let explanation = explanation_lines.join("\n").trim().to_string();
    CompletionResult {
        code,
        explanation: if explanation.is_empty() {
            PLACEHOLDER_EXPLANATION.to_string()
        } else {
            explanation
        },
    }
}

/// Find the first fenced code block. Returns `(block_contents, text_after)`.
fn extract_fenced_block(text: &str) -> Option<(&str, &str)> {
    let open = text.find("```")?;
    let after_open = &text[open + 3..];
    // Drop the language label line.
    let body_start = after_open.find('\n').map(|nl| nl + 1)?;
    let body = &after_open[body_start..];
    let close = body.find("```")?;
    let block = &body[..close];
    let after = &body[close + 3..];
    Some((block, after))
}

// ─── Suggestion parsing ───────────────────────────────────────────────────────

/// Parse the model's inline-completion response into suggestions.
///
/// Accepts either a bare JSON array or `{"suggestions": [...]}`, possibly
/// wrapped in a code fence. Any parse failure returns an empty list — an
/// unusable completion response must never surface as an error.
pub fn parse_suggestions(raw: &str) -> Vec<Suggestion> {
    #[derive(Deserialize)]
    struct Wrapped {
        suggestions: Vec<Suggestion>,
    }

    let cleaned = strip_code_fence(raw);
    let mut parsed: Vec<Suggestion> =
        if let Ok(list) = serde_json::from_str::<Vec<Suggestion>>(&cleaned) {
            list
        } else if let Ok(w) = serde_json::from_str::<Wrapped>(&cleaned) {
            w.suggestions
        } else {
            return Vec::new();
        };

    parsed.truncate(MAX_SUGGESTIONS);
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strip_fence_with_language_label() {
        assert_eq!(strip_code_fence("```js\nlet a = 1;\n```"), "let a = 1;");
        assert_eq!(strip_code_fence("no fences here"), "no fences here");
    }

    #[test]
    fn split_fenced_block_with_trailing_prose() {
        let raw = "```js\nCODE\n```\nEXPLANATION";
        let result = split_code_and_explanation(raw);
        assert_eq!(result.code, "CODE");
        assert_eq!(result.explanation, "EXPLANATION");
    }

    #[test]
    fn split_fenced_block_without_prose_gets_placeholder() {
        let result = split_code_and_explanation("```py\nprint(1)\n```");
        assert_eq!(result.code, "print(1)");
        assert_eq!(result.explanation, PLACEHOLDER_EXPLANATION);
    }

    #[test]
    fn split_on_marker_line() {
        let raw = "let x = 1;\nlet y = 2;\nExplanation: x and y are constants.";
        let result = split_code_and_explanation(raw);
        assert_eq!(result.code, "let x = 1;\nlet y = 2;");
        assert_eq!(result.explanation, "Explanation: x and y are constants.");
    }

    #[test]
    fn split_marker_is_case_insensitive() {
        let raw = "code()\nHere's How it works: magic.";
        let result = split_code_and_explanation(raw);
        assert_eq!(result.code, "code()");
        assert!(result.explanation.starts_with("Here's How"));
    }

    #[test]
    fn split_without_fence_or_marker_is_all_code() {
        let raw = "const a = 1;\nconst b = 2;";
        let result = split_code_and_explanation(raw);
        assert_eq!(result.code, raw);
        assert_eq!(result.explanation, PLACEHOLDER_EXPLANATION);
    }

    #[test]
    fn suggestions_from_bare_array() {
        let raw = r#"[{"text":"foo()","description":"call foo"}]"#;
        let parsed = parse_suggestions(raw);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].text, "foo()");
    }

    #[test]
    fn suggestions_from_wrapped_object_in_fence() {
        let raw = "```json\n{\"suggestions\":[{\"text\":\"a\",\"description\":\"d\"}]}\n```";
        assert_eq!(parse_suggestions(raw).len(), 1);
    }

    #[test]
    fn suggestions_truncated_to_limit() {
        let items: Vec<String> = (0..8)
            .map(|i| format!("{{\"text\":\"t{i}\",\"description\":\"d\"}}"))
            .collect();
        let raw = format!("[{}]", items.join(","));
        assert_eq!(parse_suggestions(&raw).len(), MAX_SUGGESTIONS);
    }

    #[test]
    fn suggestions_parse_failure_is_empty() {
        assert!(parse_suggestions("Sure! Here are some ideas:").is_empty());
        assert!(parse_suggestions("").is_empty());
    }
}
