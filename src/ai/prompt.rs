// SPDX-License-Identifier: MIT
// Prompt builders for every façade operation.

use serde::{Deserialize, Serialize};

/// Lines of surrounding code included on each side of the cursor when
/// building an inline-completion prompt.
const COMPLETION_WINDOW_LINES: usize = 5;

/// Maximum suggestions an inline-completion response may carry.
pub const MAX_SUGGESTIONS: usize = 5;

// ─── Context types ────────────────────────────────────────────────────────────

/// A named file snippet supplied as prompt context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextFile {
    pub name: String,
    pub content: String,
}

/// Optional contextual bundle sent alongside a natural-language prompt.
///
/// Each field is independent; an empty bundle renders to an empty string and
/// adds nothing to the user message. This replaces the original untyped bag
/// of properties with an explicit optional-field struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptContext {
    /// The file currently open in the editor.
    pub current_file: Option<ContextFile>,
    /// Text selected in the editor, if any.
    pub selected_code: Option<String>,
    /// Flat list of file paths in the project.
    pub project_structure: Option<Vec<String>>,
    /// Other files relevant to the request.
    pub related_files: Option<Vec<ContextFile>>,
}

impl PromptContext {
    pub fn is_empty(&self) -> bool {
        self.current_file.is_none()
            && self.selected_code.is_none()
            && self.project_structure.is_none()
            && self.related_files.is_none()
    }

    /// Serialize the bundle into a labelled text block for the user message.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(file) = &self.current_file {
            out.push_str(&format!(
                "Current file ({}):\n{}\n\n",
                file.name, file.content
            ));
        }
        if let Some(selection) = &self.selected_code {
            out.push_str(&format!("Selected code:\n{selection}\n\n"));
        }
        if let Some(structure) = &self.project_structure {
            out.push_str("Project structure:\n");
            for path in structure {
                out.push_str(&format!("- {path}\n"));
            }
            out.push('\n');
        }
        if let Some(related) = &self.related_files {
            for file in related {
                out.push_str(&format!("Related file ({}):\n{}\n\n", file.name, file.content));
            }
        }
        out
    }
}

/// Cursor position as reported by the Monaco editor (1-based).
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPosition {
    pub line_number: usize,
    pub column: usize,
}

// ─── Builders ─────────────────────────────────────────────────────────────────

pub fn codegen_system(language: &str) -> String {
    format!(
        "You are an expert {language} programmer. Generate clean, working {language} code \
         for the user's request. Respond with the code in a fenced code block."
    )
}

pub fn codegen_user(prompt: &str, context: Option<&str>) -> String {
    match context {
        Some(ctx) if !ctx.trim().is_empty() => {
            format!("Context:\n{ctx}\n\nRequest: {prompt}")
        }
        _ => format!("Request: {prompt}"),
    }
}

pub fn context_aware_user(prompt: &str, language: &str, context: &PromptContext) -> String {
    let rendered = context.render();
    if rendered.is_empty() {
        format!("Write {language} code for this request, then explain how it works.\n\nRequest: {prompt}")
    } else {
        format!(
            "Write {language} code for this request, then explain how it works.\n\n\
             {rendered}Request: {prompt}"
        )
    }
}

pub fn explain_system(language: &str) -> String {
    format!(
        "You are an expert {language} programmer. Explain the given code clearly \
         and concisely for a developer who has not seen it before."
    )
}

pub fn explain_user(code: &str, language: &str) -> String {
    format!("Explain this {language} code:\n\n```{language}\n{code}\n```")
}

pub fn debug_system(language: &str) -> String {
    format!(
        "You are an expert {language} programmer and debugger. Identify the cause of \
         the error and provide a corrected version of the code where appropriate."
    )
}

pub fn debug_user(code: &str, error_text: &str, language: &str) -> String {
    format!(
        "This {language} code fails:\n\n```{language}\n{code}\n```\n\n\
         Error:\n{error_text}\n\nWhat is wrong and how do I fix it?"
    )
}

pub fn chat_system() -> String {
    "You are a helpful AI coding assistant inside a cloud IDE. Answer the developer's \
     questions about their project and about programming in general."
        .to_string()
}

pub fn chat_user(message: &str, context: Option<&str>) -> String {
    match context {
        Some(ctx) if !ctx.trim().is_empty() => format!("{ctx}\n\n{message}"),
        _ => message.to_string(),
    }
}

pub fn completion_system(language: &str) -> String {
    format!(
        "You are a {language} code-completion engine. Given code around a cursor marker, \
         respond ONLY with a JSON array of up to {MAX_SUGGESTIONS} suggestions, each an object \
         with \"text\" (the code to insert) and \"description\" (one short sentence). \
         No markdown fences, no prose."
    )
}

/// Build the ±5-line window around the cursor, with a `<CURSOR>` marker
/// inserted at the cursor column.
///
/// `position` is 1-based (Monaco convention); out-of-range positions clamp to
/// the nearest valid line/column rather than erroring.
pub fn completion_window(code: &str, position: CursorPosition) -> String {
    let lines: Vec<&str> = code.lines().collect();
    if lines.is_empty() {
        return "<CURSOR>".to_string();
    }

    let cursor_idx = position.line_number.saturating_sub(1).min(lines.len() - 1);
    let start = cursor_idx.saturating_sub(COMPLETION_WINDOW_LINES);
    let end = (cursor_idx + COMPLETION_WINDOW_LINES + 1).min(lines.len());

    let mut out = String::new();
    for (idx, line) in lines[start..end].iter().enumerate() {
        let line_no = start + idx;
        if line_no == cursor_idx {
            // Clamp the column to the line length (byte-safe for ASCII-heavy
            // source; multi-byte boundaries clamp to the line end).
            let col = position.column.saturating_sub(1);
            let split = line
                .char_indices()
                .map(|(i, _)| i)
                .nth(col)
                .unwrap_or(line.len());
            out.push_str(&line[..split]);
            out.push_str("<CURSOR>");
            out.push_str(&line[split..]);
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}
