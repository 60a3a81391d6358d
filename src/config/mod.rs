use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_TOKENS: u32 = 2048;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

// ─── AiConfig ────────────────────────────────────────────────────────────────

/// Model-completion API configuration (`[ai]` in config.toml).
///
/// Temperatures are per operation, not a single global constant: code
/// generation and inline completion run cold for determinism; chat and
/// explanation run warmer for readable prose.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AiConfig {
    /// Base URL of an OpenAI-compatible chat-completions API.
    pub api_base_url: String,
    /// API key. Empty = unset; AI endpoints then fail with an upstream error.
    pub api_key: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Upstream request timeout in seconds. The completion call is the only
    /// place in the daemon where a timeout is meaningful.
    pub timeout_secs: u64,
    /// Maximum tokens requested per completion.
    pub max_tokens: u32,
    /// Temperature for code generation and debugging (default: 0.2).
    pub temperature_codegen: f32,
    /// Temperature for inline completion suggestions (default: 0.1).
    pub temperature_completion: f32,
    /// Temperature for explanation requests (default: 0.5).
    pub temperature_explain: f32,
    /// Temperature for assistant chat (default: 0.8).
    pub temperature_chat: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_AI_TIMEOUT_SECS,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature_codegen: 0.2,
            temperature_completion: 0.1,
            temperature_explain: 0.5,
            temperature_chat: 0.8,
        }
    }
}

// ─── TOML config file ─────────────────────────────────────────────────────────

/// `config.toml` — all fields are optional overrides.
/// Priority: CLI / env var  >  TOML  >  built-in default.
#[derive(Deserialize, Default)]
struct TomlConfig {
    /// HTTP + WebSocket server port (default: 5000).
    port: Option<u16>,
    /// Bind address (default: 127.0.0.1; use 0.0.0.0 for LAN access).
    bind_address: Option<String>,
    /// Log level filter string, e.g. "debug", "info,nimbusd=trace".
    log: Option<String>,
    /// Log output format: "pretty" (default) or "json".
    log_format: Option<String>,
    /// Allowed CORS origin for the browser frontend ("*" = any).
    cors_origin: Option<String>,
    #[serde(default)]
    ai: AiConfig,
}

// ─── ServerConfig ─────────────────────────────────────────────────────────────

/// Fully resolved daemon configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub bind_address: String,
    pub log: String,
    pub log_format: String,
    pub cors_origin: String,
    pub ai: AiConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: default_bind_address(),
            log: "info".to_string(),
            log_format: "pretty".to_string(),
            cors_origin: "*".to_string(),
            ai: AiConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration with the standard priority chain.
    ///
    /// `config_path` is read if it exists; a malformed file logs a warning and
    /// falls back to defaults rather than aborting startup. CLI/env overrides
    /// (already parsed by clap) are applied last.
    pub fn load(
        config_path: Option<&Path>,
        port_override: Option<u16>,
        bind_override: Option<String>,
        log_override: Option<String>,
        api_key_override: Option<String>,
    ) -> Self {
        let toml_cfg = config_path
            .map(read_toml_config)
            .unwrap_or_default();

        let mut ai = toml_cfg.ai;
        if let Some(key) = api_key_override {
            ai.api_key = key;
        }

        Self {
            port: port_override.or(toml_cfg.port).unwrap_or(DEFAULT_PORT),
            bind_address: bind_override
                .or(toml_cfg.bind_address)
                .unwrap_or_else(default_bind_address),
            log: log_override
                .or(toml_cfg.log)
                .unwrap_or_else(|| "info".to_string()),
            log_format: toml_cfg
                .log_format
                .unwrap_or_else(|| "pretty".to_string()),
            cors_origin: toml_cfg.cors_origin.unwrap_or_else(|| "*".to_string()),
            ai,
        }
    }
}

fn read_toml_config(path: &Path) -> TomlConfig {
    match std::fs::read_to_string(path) {
        Ok(raw) => match toml::from_str(&raw) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %path.display(), err = %e, "malformed config.toml — using defaults");
                TomlConfig::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => TomlConfig::default(),
        Err(e) => {
            warn!(path = %path.display(), err = %e, "could not read config.toml — using defaults");
            TomlConfig::default()
        }
    }
}
