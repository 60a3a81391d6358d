// SPDX-License-Identifier: MIT
//! Execution façade — synthesizes a textual run transcript from source code
//! without executing anything.
//!
//! This is explicitly a simulator: per-language regexes pull the literal
//! arguments out of common print idioms and replay them as the program's
//! output. A real engine would need process isolation, CPU/memory/wall-clock
//! limits, and captured stdout/stderr; none of that lives here.

use once_cell::sync::Lazy;
use regex::Regex;

/// Languages the simulator recognizes, after tag normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Shell,
}

impl Language {
    /// Normalize a user-supplied language tag. Returns `None` for languages
    /// the simulator does not understand.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "javascript" | "js" => Some(Self::JavaScript),
            "typescript" | "ts" => Some(Self::TypeScript),
            "python" | "py" => Some(Self::Python),
            "bash" | "shell" | "sh" => Some(Self::Shell),
            _ => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::JavaScript => "JavaScript",
            Self::TypeScript => "TypeScript",
            Self::Python => "Python",
            Self::Shell => "Bash",
        }
    }
}

// One regex per print idiom. Single- and double-quoted literals both match;
// the first capture group that matched carries the text.
static JS_PRINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"console\.log\(\s*(?:"([^"]*)"|'([^']*)')\s*\)"#).unwrap());
static PY_PRINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"print\(\s*(?:"([^"]*)"|'([^']*)')\s*\)"#).unwrap());
static SH_ECHO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"echo\s+(?:"([^"]*)"|'([^']*)'|(\S+))"#).unwrap());

/// Simulate running `code` under `language` and return the transcript.
///
/// Unknown languages get a fixed "not implemented" message naming the
/// language; a source containing an `error`/`Error` substring gets an error
/// transcript instead of output.
pub fn run_snippet(code: &str, language: &str) -> String {
    let Some(lang) = Language::parse(language) else {
        return not_implemented_message(language);
    };

    let name = lang.display_name();

    if code.contains("error") || code.contains("Error") {
        return format!(
            "Error from {name} execution:\n\
             The program terminated with an error. Check the source for details."
        );
    }

    let pattern: &Regex = match lang {
        Language::JavaScript | Language::TypeScript => &JS_PRINT,
        Language::Python => &PY_PRINT,
        Language::Shell => &SH_ECHO,
    };

    let mut lines: Vec<String> = Vec::new();
    for caps in pattern.captures_iter(code) {
        let text = caps
            .iter()
            .skip(1)
            .flatten()
            .next()
            .map(|m| m.as_str())
            .unwrap_or_default();
        lines.push(text.to_string());
    }

    if lines.is_empty() {
        format!("Output from {name} execution:\n(program produced no output)")
    } else {
        format!("Output from {name} execution:\n{}", lines.join("\n"))
    }
}

/// The fixed reply for a language the simulator cannot run.
pub fn not_implemented_message(language: &str) -> String {
    format!("Execution for language '{language}' is not implemented in this environment.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_print_is_replayed() {
        let out = run_snippet(r#"print("hello")"#, "python");
        assert!(out.starts_with("Output from Python execution:"));
        assert!(out.contains("hello"));
    }

    #[test]
    fn py_alias_normalizes() {
        let out = run_snippet("print('hi')", "py");
        assert!(out.starts_with("Output from Python execution:"));
        assert!(out.contains("hi"));
    }

    #[test]
    fn javascript_console_log_both_quote_styles() {
        let code = "console.log(\"one\");\nconsole.log('two');";
        let out = run_snippet(code, "javascript");
        assert!(out.contains("one\ntwo"));
    }

    #[test]
    fn typescript_uses_js_idioms() {
        let out = run_snippet(r#"console.log("typed")"#, "ts");
        assert!(out.starts_with("Output from TypeScript execution:"));
        assert!(out.contains("typed"));
    }

    #[test]
    fn bash_echo_unquoted_word() {
        let out = run_snippet("echo done", "shell");
        assert!(out.starts_with("Output from Bash execution:"));
        assert!(out.contains("done"));
    }

    #[test]
    fn error_substring_produces_error_transcript() {
        let out = run_snippet("raise Error('boom')", "python");
        assert!(out.starts_with("Error from Python execution:"));
    }

    #[test]
    fn no_prints_reports_no_output() {
        let out = run_snippet("let a = 1;", "javascript");
        assert!(out.contains("no output"));
    }

    #[test]
    fn unknown_language_fixed_message() {
        let out = run_snippet("ANYTHING", "cobol");
        assert_eq!(out, not_implemented_message("cobol"));
    }
}
